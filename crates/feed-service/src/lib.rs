//! # feed-service
//!
//! Engagement engine (reaction ledger, comment tree, aggregator, ranker) and
//! the services and DTOs that drive it.

pub mod dto;
pub mod engine;
pub mod services;

pub use engine::{
    CommentTree, EngagementAggregator, EngagementSignals, EngagementSource, FeedRanker,
    PostDirectory, RankedPost, ReactionChange, ReactionLedger, ThreadEntry,
};
pub use services::{
    CommentService, FeedService, PostService, ReactionService, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
