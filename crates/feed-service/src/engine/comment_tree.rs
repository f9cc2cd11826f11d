//! Comment tree
//!
//! One arena of comments per post, indexed by id. Parent links are plain ids,
//! never owning pointers, and a child list per parent keeps insertion order.
//! Deleting a comment tombstones it: the row stays so its replies remain
//! reachable, and the post's live count drops by one.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use feed_core::{Comment, DomainError, DomainResult, Snowflake, SnowflakeGenerator};
use parking_lot::RwLock;
use tracing::trace;

/// A comment together with its nesting depth (0 for top-level)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadEntry {
    pub comment: Comment,
    pub depth: usize,
}

#[derive(Debug, Default)]
struct PostThread {
    arena: HashMap<Snowflake, Comment>,
    children: HashMap<Option<Snowflake>, Vec<Snowflake>>,
    live: usize,
}

impl PostThread {
    fn insert(&mut self, comment: Comment) {
        self.children
            .entry(comment.parent_id)
            .or_default()
            .push(comment.id);
        self.arena.insert(comment.id, comment);
        self.live += 1;
    }

    fn children_of(&self, parent: Option<Snowflake>) -> Vec<Comment> {
        self.children
            .get(&parent)
            .map(|ids| ids.iter().filter_map(|id| self.arena.get(id).cloned()).collect())
            .unwrap_or_default()
    }
}

/// Forest of comments, one tree per post
pub struct CommentTree {
    threads: DashMap<Snowflake, Arc<RwLock<PostThread>>>,
    /// comment id -> owning post id
    index: DashMap<Snowflake, Snowflake>,
    ids: Arc<SnowflakeGenerator>,
}

impl CommentTree {
    pub fn new(ids: Arc<SnowflakeGenerator>) -> Self {
        Self {
            threads: DashMap::new(),
            index: DashMap::new(),
            ids,
        }
    }

    fn thread(&self, post_id: Snowflake) -> Option<Arc<RwLock<PostThread>>> {
        self.threads.get(&post_id).map(|t| Arc::clone(t.value()))
    }

    fn thread_or_create(&self, post_id: Snowflake) -> Arc<RwLock<PostThread>> {
        if let Some(thread) = self.thread(post_id) {
            return thread;
        }
        Arc::clone(self.threads.entry(post_id).or_default().value())
    }

    fn owner_of(&self, comment_id: Snowflake) -> Option<Snowflake> {
        self.index.get(&comment_id).map(|post| *post.value())
    }

    /// Add a top-level comment to a post
    pub fn add_comment(&self, post_id: Snowflake, author_id: Snowflake, body: String) -> Comment {
        let thread = self.thread_or_create(post_id);
        let mut thread = thread.write();

        // id taken under the post lock so child order always matches id order
        let comment = Comment::new(self.ids.generate(), post_id, author_id, body);
        thread.insert(comment.clone());
        self.index.insert(comment.id, post_id);

        trace!(post_id = %post_id, comment_id = %comment.id, "Comment inserted");
        comment
    }

    /// Reply to an existing comment of the same post; tombstoned parents are allowed
    pub fn reply(
        &self,
        post_id: Snowflake,
        parent_id: Snowflake,
        author_id: Snowflake,
        body: String,
    ) -> DomainResult<Comment> {
        let not_found = || DomainError::ParentNotFound { post_id, parent_id };

        let thread = self.thread(post_id).ok_or_else(not_found)?;
        let mut thread = thread.write();

        if !thread.arena.contains_key(&parent_id) {
            return Err(not_found());
        }

        let comment = Comment::new_reply(self.ids.generate(), post_id, parent_id, author_id, body);
        thread.insert(comment.clone());
        self.index.insert(comment.id, post_id);

        trace!(
            post_id = %post_id,
            parent_id = %parent_id,
            comment_id = %comment.id,
            "Reply inserted"
        );
        Ok(comment)
    }

    /// Replace a comment's body
    pub fn edit(&self, comment_id: Snowflake, body: String) -> DomainResult<Comment> {
        let post_id = self
            .owner_of(comment_id)
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        let thread = self
            .thread(post_id)
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        let mut thread = thread.write();

        let comment = thread
            .arena
            .get_mut(&comment_id)
            .ok_or(DomainError::CommentNotFound(comment_id))?;
        if comment.is_deleted() {
            return Err(DomainError::CommentDeleted(comment_id));
        }

        comment.edit(body);
        Ok(comment.clone())
    }

    /// Tombstone a comment
    ///
    /// Returns the comment if this call deleted it; `None` when it was already
    /// deleted or never existed, both of which leave the tree unchanged.
    pub fn delete(&self, comment_id: Snowflake) -> Option<Comment> {
        let post_id = self.owner_of(comment_id)?;
        let thread = self.thread(post_id)?;
        let mut thread = thread.write();

        let comment = thread.arena.get_mut(&comment_id)?;
        if !comment.tombstone() {
            return None;
        }
        let deleted = comment.clone();
        thread.live = thread.live.saturating_sub(1);

        trace!(post_id = %post_id, comment_id = %comment_id, "Comment tombstoned");
        Some(deleted)
    }

    pub fn get(&self, comment_id: Snowflake) -> DomainResult<Comment> {
        self.owner_of(comment_id)
            .and_then(|post_id| self.thread(post_id))
            .and_then(|thread| thread.read().arena.get(&comment_id).cloned())
            .ok_or(DomainError::CommentNotFound(comment_id))
    }

    /// Direct children of `parent` (or the top-level comments when `None`) in insertion order
    ///
    /// Tombstoned comments are included so the caller can render their subtrees.
    pub fn children_of(
        &self,
        parent: Option<Snowflake>,
        post_id: Snowflake,
    ) -> DomainResult<Vec<Comment>> {
        let Some(thread) = self.thread(post_id) else {
            return match parent {
                None => Ok(Vec::new()),
                Some(id) => Err(DomainError::CommentNotFound(id)),
            };
        };
        let thread = thread.read();

        if let Some(id) = parent {
            if !thread.arena.contains_key(&id) {
                return Err(DomainError::CommentNotFound(id));
            }
        }

        Ok(thread.children_of(parent))
    }

    /// Whole tree of a post, depth-first with children in insertion order
    pub fn thread_of(&self, post_id: Snowflake) -> Vec<ThreadEntry> {
        let Some(thread) = self.thread(post_id) else {
            return Vec::new();
        };
        let thread = thread.read();

        let mut out = Vec::with_capacity(thread.arena.len());
        let mut stack: Vec<(Snowflake, usize)> = thread
            .children
            .get(&None)
            .map(|roots| roots.iter().rev().map(|id| (*id, 0)).collect())
            .unwrap_or_default();

        while let Some((id, depth)) = stack.pop() {
            if let Some(kids) = thread.children.get(&Some(id)) {
                stack.extend(kids.iter().rev().map(|kid| (*kid, depth + 1)));
            }
            if let Some(comment) = thread.arena.get(&id) {
                out.push(ThreadEntry {
                    depth,
                    comment: comment.clone(),
                });
            }
        }
        out
    }

    /// Non-deleted comments on the post
    pub fn live_count(&self, post_id: Snowflake) -> usize {
        self.thread(post_id).map_or(0, |thread| thread.read().live)
    }

    /// Drop the post's whole tree
    pub fn forget(&self, post_id: Snowflake) -> bool {
        let Some((_, thread)) = self.threads.remove(&post_id) else {
            return false;
        };
        for id in thread.read().arena.keys() {
            self.index.remove(id);
        }
        true
    }
}

impl std::fmt::Debug for CommentTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentTree")
            .field("posts", &self.threads.len())
            .field("comments", &self.index.len())
            .finish()
    }
}
