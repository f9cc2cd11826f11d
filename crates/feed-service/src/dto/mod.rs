//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs with validation for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting engine values to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CommentsQuery, CreateCommentRequest, CreatePostRequest, FeedQuery, ReactRequest, ReactionQuery,
    UpdateCommentRequest,
};

pub use responses::{
    CommentResponse, FeedItemResponse, FeedResponse, HealthResponse, PostResponse,
    ReactionChangeResponse, ReactionSummaryResponse, ThreadNodeResponse,
};
