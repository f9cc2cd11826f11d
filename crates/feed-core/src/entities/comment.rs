//! Comment entity - one node of a post's comment forest

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Comment entity
///
/// `parent_id` is a back-reference into the same post's arena; `None` marks a
/// top-level comment. A deleted comment keeps its row so replies stay attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub id: Snowflake,
    pub post_id: Snowflake,
    pub parent_id: Option<Snowflake>,
    pub author_id: Snowflake,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub edited_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Comment {
    /// Create a top-level comment
    pub fn new(id: Snowflake, post_id: Snowflake, author_id: Snowflake, body: String) -> Self {
        Self {
            id,
            post_id,
            parent_id: None,
            author_id,
            body,
            created_at: Utc::now(),
            edited_at: None,
            deleted_at: None,
        }
    }

    /// Create a reply to `parent_id`
    pub fn new_reply(
        id: Snowflake,
        post_id: Snowflake,
        parent_id: Snowflake,
        author_id: Snowflake,
        body: String,
    ) -> Self {
        Self {
            parent_id: Some(parent_id),
            ..Self::new(id, post_id, author_id, body)
        }
    }

    #[inline]
    pub fn is_edited(&self) -> bool {
        self.edited_at.is_some()
    }

    #[inline]
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }

    #[inline]
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Body as shown to readers; tombstones hide their text
    pub fn visible_body(&self) -> Option<&str> {
        if self.is_deleted() {
            None
        } else {
            Some(&self.body)
        }
    }

    pub fn edit(&mut self, body: String) {
        self.body = body;
        self.edited_at = Some(Utc::now());
    }

    /// Mark as deleted. Returns false if it already was.
    pub fn tombstone(&mut self) -> bool {
        if self.is_deleted() {
            return false;
        }
        self.deleted_at = Some(Utc::now());
        true
    }

    /// Truncated body for notifications and log lines
    pub fn preview(&self, max_len: usize) -> &str {
        let body = self.visible_body().unwrap_or_default();
        if body.len() <= max_len {
            return body;
        }
        let mut end = max_len;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        &body[..end]
    }
}
