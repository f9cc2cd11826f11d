//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Post not found: {0}")]
    PostNotFound(Snowflake),

    #[error("Comment not found: {0}")]
    CommentNotFound(Snowflake),

    #[error("Parent comment {parent_id} not found on post {post_id}")]
    ParentNotFound {
        post_id: Snowflake,
        parent_id: Snowflake,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Invalid reaction kind: {0}")]
    InvalidReactionKind(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Content too long: max {max} characters")]
    ContentTooLong { max: usize },

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Post already exists: {0}")]
    PostAlreadyExists(Snowflake),

    #[error("Comment has been deleted: {0}")]
    CommentDeleted(Snowflake),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::PostNotFound(_) => "UNKNOWN_POST",
            Self::CommentNotFound(_) => "UNKNOWN_COMMENT",
            Self::ParentNotFound { .. } => "PARENT_NOT_FOUND",

            // Validation
            Self::InvalidReactionKind(_) => "INVALID_REACTION_KIND",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::ContentTooLong { .. } => "CONTENT_TOO_LONG",

            // Conflict
            Self::PostAlreadyExists(_) => "POST_ALREADY_EXISTS",
            Self::CommentDeleted(_) => "COMMENT_DELETED",

            // Infrastructure
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PostNotFound(_) | Self::CommentNotFound(_) | Self::ParentNotFound { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidReactionKind(_) | Self::ValidationError(_) | Self::ContentTooLong { .. }
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::PostAlreadyExists(_) | Self::CommentDeleted(_))
    }

    /// HTTP-equivalent status for callers that expose the engine over a wire
    pub fn status_code(&self) -> u16 {
        if self.is_not_found() {
            404
        } else if self.is_validation() {
            400
        } else if self.is_conflict() {
            409
        } else {
            500
        }
    }
}
