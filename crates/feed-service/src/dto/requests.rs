//! Request DTOs for API endpoints
//!
//! Bodies implement `Deserialize` and `Validate`. Ids arrive as strings and
//! are parsed into snowflakes by the services, so a bad id is a 400 with the
//! offending field named.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

// ============================================================================
// Post Requests
// ============================================================================

/// Register a post with the engine
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    /// Upstream post id; generated when absent
    pub id: Option<String>,

    #[validate(length(min = 1, max = 20, message = "authorId must be 1-20 characters"))]
    pub author_id: String,

    /// Defaults to the time of the request
    pub created_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Reaction Requests
// ============================================================================

/// Toggle or replace the actor's reaction
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReactRequest {
    #[validate(length(min = 1, max = 20, message = "actorId must be 1-20 characters"))]
    pub actor_id: String,

    /// One of BULL, BEAR, SMART, FUNNY, FIRE, GEM, RUG
    #[validate(length(min = 1, max = 16, message = "kind must be 1-16 characters"))]
    pub kind: String,
}

/// Query for `GET /posts/{id}/reactions`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReactionQuery {
    pub actor_id: Option<String>,
}

// ============================================================================
// Comment Requests
// ============================================================================

/// Add a comment, or reply when `parentId` is set
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, max = 20, message = "actorId must be 1-20 characters"))]
    pub actor_id: String,

    #[validate(length(min = 1, message = "Comment body cannot be empty"))]
    pub body: String,

    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, message = "Comment body cannot be empty"))]
    pub body: String,
}

/// Query for `GET /posts/{id}/comments`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CommentsQuery {
    /// Omit for top-level comments
    pub parent_id: Option<String>,
}

// ============================================================================
// Feed Requests
// ============================================================================

/// Query for `GET /feed`
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct FeedQuery {
    /// hot (default), new or top
    pub sort: Option<String>,

    #[validate(range(min = 1, message = "limit must be positive"))]
    pub limit: Option<usize>,
}
