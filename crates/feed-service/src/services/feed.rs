//! Feed service
//!
//! Ranks every registered post on read. Nothing about the chosen sort is
//! remembered between calls.

use chrono::{DateTime, Utc};
use feed_core::FeedSort;
use tracing::{debug, instrument};

use crate::dto::{FeedItemResponse, FeedQuery, FeedResponse};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// Feed service
pub struct FeedService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> FeedService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self))]
    pub fn feed(&self, query: FeedQuery) -> ServiceResult<FeedResponse> {
        self.feed_at(query, Utc::now())
    }

    /// Feed as it would rank at `now`
    pub fn feed_at(&self, query: FeedQuery, now: DateTime<Utc>) -> ServiceResult<FeedResponse> {
        let sort = match query.sort.as_deref() {
            Some(raw) => raw
                .parse::<FeedSort>()
                .map_err(|e| ServiceError::validation(e.to_string()))?,
            None => FeedSort::default(),
        };
        let limit = self.ctx.feed_config().clamp_limit(query.limit);

        let posts = self.ctx.posts().list();
        let mut ranked = self
            .ctx
            .ranker()
            .rank_detailed(&posts, sort, self.ctx.aggregator(), now);
        ranked.truncate(limit);

        debug!(sort = %sort, candidates = posts.len(), returned = ranked.len(), "Feed ranked");

        Ok(FeedResponse {
            sort,
            items: ranked.into_iter().map(FeedItemResponse::from).collect(),
        })
    }
}
