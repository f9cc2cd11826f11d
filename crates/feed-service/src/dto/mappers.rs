//! Entity to DTO mappers
//!
//! Implements `From` conversions from engine values to response DTOs.

use feed_core::Comment;

use crate::engine::{RankedPost, ThreadEntry};

use super::responses::{CommentResponse, FeedItemResponse, ThreadNodeResponse};

// ============================================================================
// Comment Mappers
// ============================================================================

impl From<&Comment> for CommentResponse {
    fn from(comment: &Comment) -> Self {
        Self {
            id: comment.id.to_string(),
            post_id: comment.post_id.to_string(),
            parent_id: comment.parent_id.map(|id| id.to_string()),
            author_id: comment.author_id.to_string(),
            body: comment.visible_body().map(String::from),
            created_at: comment.created_at,
            edited_at: comment.edited_at,
            deleted: comment.is_deleted(),
        }
    }
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self::from(&comment)
    }
}

impl From<ThreadEntry> for ThreadNodeResponse {
    fn from(entry: ThreadEntry) -> Self {
        Self {
            comment: CommentResponse::from(&entry.comment),
            depth: entry.depth,
        }
    }
}

// ============================================================================
// Feed Mappers
// ============================================================================

impl From<RankedPost> for FeedItemResponse {
    fn from(ranked: RankedPost) -> Self {
        Self {
            id: ranked.post.id.to_string(),
            author_id: ranked.post.author_id.to_string(),
            created_at: ranked.post.created_at,
            signals: ranked.signals,
            hot_score: ranked.score,
        }
    }
}
