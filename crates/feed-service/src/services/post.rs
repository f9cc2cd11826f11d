//! Post service
//!
//! Registers post references and tears down a post's engagement state when
//! the post goes away upstream.

use chrono::Utc;
use feed_core::{PostRef, Snowflake};
use tracing::{debug, info, instrument};

use crate::dto::{CreatePostRequest, PostResponse};
use crate::engine::EngagementSource;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::parse_id;

/// Post service
pub struct PostService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> PostService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Register a post so it can be reacted to, commented on and ranked
    #[instrument(skip(self, request))]
    pub fn create_post(&self, request: CreatePostRequest) -> ServiceResult<PostResponse> {
        let author_id = parse_id("authorId", &request.author_id)?;
        let id = match request.id.as_deref() {
            Some(raw) => parse_id("id", raw)?,
            None => self.ctx.generate_id(),
        };
        let post = PostRef::new(id, author_id, request.created_at.unwrap_or_else(Utc::now));

        self.ctx.posts().register(post)?;

        info!(post_id = %post.id, author_id = %post.author_id, "Post registered");

        self.get_post(post.id)
    }

    /// Post with its signals and tally, read together under the post's lock
    #[instrument(skip(self))]
    pub fn get_post(&self, post_id: Snowflake) -> ServiceResult<PostResponse> {
        let response = self
            .ctx
            .posts()
            .with_post(post_id, |post| self.to_response(*post))?;
        Ok(response)
    }

    /// Forget a post and every reaction, comment and signal attached to it
    #[instrument(skip(self))]
    pub fn delete_post(&self, post_id: Snowflake) -> ServiceResult<()> {
        self.ctx.posts().remove_with(post_id, |_| {
            self.ctx.ledger().forget(post_id);
            self.ctx.comments().forget(post_id);
            self.ctx.aggregator().forget(post_id);
        })?;

        info!(post_id = %post_id, "Post deleted");

        Ok(())
    }

    /// Look up a registered post
    pub fn require(&self, post_id: Snowflake) -> ServiceResult<PostRef> {
        let post = self.ctx.posts().get(post_id)?;
        debug!(post_id = %post_id, "Post found");
        Ok(post)
    }

    // Caller holds the post's slot lock
    fn to_response(&self, post: PostRef) -> PostResponse {
        PostResponse {
            id: post.id.to_string(),
            author_id: post.author_id.to_string(),
            created_at: post.created_at,
            signals: self.ctx.aggregator().signals_of(post.id),
            reactions: self.ctx.ledger().tally_of(post.id),
        }
    }
}
