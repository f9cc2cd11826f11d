//! Comment service
//!
//! Handles comment creation, replies, edits, tombstone deletes and thread reads.

use feed_core::{DomainError, Snowflake};
use tracing::{debug, info, instrument};

use crate::dto::{CommentResponse, CreateCommentRequest, ThreadNodeResponse, UpdateCommentRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::parse_id;
use super::post::PostService;

/// Comment service
pub struct CommentService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> CommentService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Add a top-level comment, or a reply when `parentId` is set
    #[instrument(skip(self, request), fields(actor_id = %request.actor_id))]
    pub fn create_comment(
        &self,
        post_id: Snowflake,
        request: CreateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        let author_id = parse_id("actorId", &request.actor_id)?;
        self.check_body(&request.body)?;
        let parent_id = request
            .parent_id
            .as_deref()
            .map(|raw| parse_id("parentId", raw))
            .transpose()?;

        let tree = self.ctx.comments();
        let comment = self.ctx.posts().with_post(post_id, |_| {
            let comment = match parent_id {
                Some(parent_id) => tree.reply(post_id, parent_id, author_id, request.body)?,
                None => tree.add_comment(post_id, author_id, request.body),
            };
            self.ctx.aggregator().record_comment_added(post_id);
            Ok::<_, DomainError>(comment)
        })??;

        info!(
            post_id = %post_id,
            comment_id = %comment.id,
            parent_id = ?comment.parent_id.map(|id| id.to_string()),
            author_id = %author_id,
            "Comment created"
        );

        Ok(CommentResponse::from(comment))
    }

    #[instrument(skip(self))]
    pub fn get_comment(&self, comment_id: Snowflake) -> ServiceResult<CommentResponse> {
        let comment = self.ctx.comments().get(comment_id)?;
        Ok(CommentResponse::from(comment))
    }

    /// Direct children of `parent_id`, or top-level comments when `None`
    #[instrument(skip(self))]
    pub fn list_comments(
        &self,
        post_id: Snowflake,
        parent_id: Option<Snowflake>,
    ) -> ServiceResult<Vec<CommentResponse>> {
        PostService::new(self.ctx).require(post_id)?;

        let children = self.ctx.comments().children_of(parent_id, post_id)?;
        debug!(post_id = %post_id, count = children.len(), "Comments listed");

        Ok(children.iter().map(CommentResponse::from).collect())
    }

    /// Whole comment tree of a post, depth-first
    #[instrument(skip(self))]
    pub fn thread(&self, post_id: Snowflake) -> ServiceResult<Vec<ThreadNodeResponse>> {
        PostService::new(self.ctx).require(post_id)?;

        Ok(self
            .ctx
            .comments()
            .thread_of(post_id)
            .into_iter()
            .map(ThreadNodeResponse::from)
            .collect())
    }

    #[instrument(skip(self, request))]
    pub fn edit_comment(
        &self,
        comment_id: Snowflake,
        request: UpdateCommentRequest,
    ) -> ServiceResult<CommentResponse> {
        self.check_body(&request.body)?;

        let comment = self.ctx.comments().edit(comment_id, request.body)?;

        info!(comment_id = %comment_id, post_id = %comment.post_id, "Comment edited");

        Ok(CommentResponse::from(comment))
    }

    /// Tombstone a comment; deleting an unknown or already deleted comment succeeds
    #[instrument(skip(self))]
    pub fn delete_comment(&self, comment_id: Snowflake) -> ServiceResult<()> {
        let Ok(post_id) = self.ctx.comments().get(comment_id).map(|c| c.post_id) else {
            debug!(comment_id = %comment_id, "Comment already gone");
            return Ok(());
        };

        // The post may be torn down between the lookup and the lock; then the
        // comment went with it and there is nothing to do
        let removed = self.ctx.posts().with_post(post_id, |_| {
            let removed = self.ctx.comments().delete(comment_id);
            if removed.is_some() {
                self.ctx.aggregator().record_comment_removed(post_id);
            }
            removed
        });

        match removed {
            Ok(Some(_)) => info!(comment_id = %comment_id, post_id = %post_id, "Comment deleted"),
            _ => debug!(comment_id = %comment_id, "Comment already gone"),
        }
        Ok(())
    }

    fn check_body(&self, body: &str) -> ServiceResult<()> {
        if body.trim().is_empty() {
            let msg = "Comment body cannot be empty".to_string();
            return Err(DomainError::ValidationError(msg).into());
        }
        let max = self.ctx.comment_config().max_length;
        if body.chars().count() > max {
            return Err(DomainError::ContentTooLong { max }.into());
        }
        Ok(())
    }
}
