//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs are serialized as strings for JavaScript compatibility.

use chrono::{DateTime, Utc};
use feed_core::{FeedSort, ReactionKind, ReactionTally};
use serde::Serialize;

use crate::engine::EngagementSignals;

// ============================================================================
// Post Responses
// ============================================================================

/// Post reference with its current engagement
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub signals: EngagementSignals,
    pub reactions: ReactionTally,
}

// ============================================================================
// Reaction Responses
// ============================================================================

/// Result of a toggle/replace
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionChangeResponse {
    pub post_id: String,
    pub actor_id: String,
    pub previous: Option<ReactionKind>,
    /// `null` when the call toggled the reaction off
    pub current: Option<ReactionKind>,
    pub tally: ReactionTally,
    pub sentiment: i64,
}

/// Tally of a post, plus the asking actor's own reaction
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionSummaryResponse {
    pub post_id: String,
    pub tally: ReactionTally,
    pub total: u64,
    pub sentiment: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub me: Option<ReactionKind>,
}

// ============================================================================
// Comment Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: String,
    pub post_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub author_id: String,
    /// `null` for deleted comments
    pub body: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edited_at: Option<DateTime<Utc>>,
    pub deleted: bool,
}

/// One row of a materialized thread
#[derive(Debug, Clone, Serialize)]
pub struct ThreadNodeResponse {
    #[serde(flatten)]
    pub comment: CommentResponse,
    pub depth: usize,
}

// ============================================================================
// Feed Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItemResponse {
    pub id: String,
    pub author_id: String,
    pub created_at: DateTime<Utc>,
    pub signals: EngagementSignals,
    pub hot_score: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedResponse {
    pub sort: FeedSort,
    pub items: Vec<FeedItemResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}
