//! Service context - dependency container for services
//!
//! Owns the engine components. Cloning is cheap: every component sits behind
//! an `Arc`, so all clones share the same state.

use std::sync::Arc;

use feed_common::{AppConfig, CommentConfig, FeedConfig, RankingConfig};
use feed_core::{Snowflake, SnowflakeGenerator};

use crate::engine::{CommentTree, EngagementAggregator, FeedRanker, PostDirectory, ReactionLedger};

use super::error::ServiceResult;

#[derive(Clone)]
pub struct ServiceContext {
    // Engine
    posts: Arc<PostDirectory>,
    ledger: Arc<ReactionLedger>,
    comments: Arc<CommentTree>,
    aggregator: Arc<EngagementAggregator>,
    ranker: FeedRanker,

    // Limits
    feed_config: FeedConfig,
    comment_config: CommentConfig,

    snowflake_generator: Arc<SnowflakeGenerator>,
}

impl ServiceContext {
    pub fn new(
        snowflake_generator: Arc<SnowflakeGenerator>,
        ranking: RankingConfig,
        feed_config: FeedConfig,
        comment_config: CommentConfig,
    ) -> Self {
        Self {
            posts: Arc::new(PostDirectory::new()),
            ledger: Arc::new(ReactionLedger::new()),
            comments: Arc::new(CommentTree::new(Arc::clone(&snowflake_generator))),
            aggregator: Arc::new(EngagementAggregator::new()),
            ranker: FeedRanker::new(ranking),
            feed_config,
            comment_config,
            snowflake_generator,
        }
    }

    /// Context wired from the process configuration
    pub fn from_config(config: &AppConfig) -> ServiceResult<Self> {
        ServiceContextBuilder::new()
            .snowflake_generator(Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id)))
            .ranking(config.ranking)
            .feed(config.feed)
            .comments(config.comments)
            .build()
    }

    // === Engine ===

    pub fn posts(&self) -> &PostDirectory {
        &self.posts
    }

    pub fn ledger(&self) -> &ReactionLedger {
        &self.ledger
    }

    pub fn comments(&self) -> &CommentTree {
        &self.comments
    }

    pub fn aggregator(&self) -> &EngagementAggregator {
        &self.aggregator
    }

    pub fn ranker(&self) -> &FeedRanker {
        &self.ranker
    }

    // === Limits ===

    pub fn feed_config(&self) -> &FeedConfig {
        &self.feed_config
    }

    pub fn comment_config(&self) -> &CommentConfig {
        &self.comment_config
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("posts", &self.posts.len())
            .field("ledger", &self.ledger)
            .field("comments", &self.comments)
            .field("ranker", &self.ranker)
            .finish_non_exhaustive()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// Every setting is optional; unset ones take the documented defaults.
#[derive(Default)]
pub struct ServiceContextBuilder {
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    ranking: Option<RankingConfig>,
    feed: Option<FeedConfig>,
    comments: Option<CommentConfig>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn ranking(mut self, ranking: RankingConfig) -> Self {
        self.ranking = Some(ranking);
        self
    }

    pub fn feed(mut self, feed: FeedConfig) -> Self {
        self.feed = Some(feed);
        self
    }

    pub fn comments(mut self, comments: CommentConfig) -> Self {
        self.comments = Some(comments);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Config` if the ranking parameters are unusable
    pub fn build(self) -> ServiceResult<ServiceContext> {
        let ranking = self.ranking.unwrap_or_default();
        ranking.validate()?;

        Ok(ServiceContext::new(
            self.snowflake_generator.unwrap_or_default(),
            ranking,
            self.feed.unwrap_or_default(),
            self.comments.unwrap_or_default(),
        ))
    }
}
