//! Business logic services
//!
//! Thin orchestration over the engine: parse and check request fields, apply
//! the mutation, feed the resulting delta to the aggregator, and log it.

pub mod comment;
pub mod context;
pub mod error;
pub mod feed;
pub mod post;
pub mod reaction;

pub use comment::CommentService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use feed::FeedService;
pub use post::PostService;
pub use reaction::ReactionService;

use feed_core::Snowflake;

/// Parse a string id from a request field
pub(crate) fn parse_id(field: &str, raw: &str) -> ServiceResult<Snowflake> {
    Snowflake::parse(raw)
        .map_err(|_| ServiceError::validation(format!("{field} is not a valid id")))
}
