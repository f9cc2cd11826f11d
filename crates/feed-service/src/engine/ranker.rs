//! Feed ranker
//!
//! Orders a set of posts under one of the [`FeedSort`] strategies. Ranking is
//! pull-based: it runs on every read against the current signals and never
//! stores an order. The caller's slice is left untouched.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use feed_common::RankingConfig;
use feed_core::{FeedSort, PostRef, Snowflake};
use serde::Serialize;

use super::aggregator::{EngagementSignals, EngagementSource};

/// A post with the signals and score it was ranked by
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedPost {
    pub post: PostRef,
    pub signals: EngagementSignals,
    /// Hot score at ranking time, whatever the strategy
    pub score: f64,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FeedRanker {
    config: RankingConfig,
}

impl FeedRanker {
    pub fn new(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// `reactions + comments * comment_weight`
    pub fn raw_score(&self, signals: &EngagementSignals) -> f64 {
        signals.reaction_total as f64 + signals.comment_count as f64 * self.config.comment_weight
    }

    /// Raw score divided by `1 + age / decay`; halves once the post is one decay period old
    pub fn hot_score(
        &self,
        post: &PostRef,
        signals: &EngagementSignals,
        now: DateTime<Utc>,
    ) -> f64 {
        let age = post.age_millis(now) as f64;
        self.raw_score(signals) / (1.0 + age / self.config.decay_millis)
    }

    /// Post ids in feed order
    pub fn rank<S>(
        &self,
        posts: &[PostRef],
        sort: FeedSort,
        source: &S,
        now: DateTime<Utc>,
    ) -> Vec<Snowflake>
    where
        S: EngagementSource + ?Sized,
    {
        self.rank_detailed(posts, sort, source, now)
            .into_iter()
            .map(|ranked| ranked.post.id)
            .collect()
    }

    /// Like [`rank`](Self::rank) but keeps the signals and score of each post
    pub fn rank_detailed<S>(
        &self,
        posts: &[PostRef],
        sort: FeedSort,
        source: &S,
        now: DateTime<Utc>,
    ) -> Vec<RankedPost>
    where
        S: EngagementSource + ?Sized,
    {
        // one read per post; later sorting never goes back to the source
        let mut ranked: Vec<RankedPost> = posts
            .iter()
            .map(|post| {
                let signals = source.signals_of(post.id);
                RankedPost {
                    post: *post,
                    signals,
                    score: self.hot_score(post, &signals, now),
                }
            })
            .collect();

        match sort {
            FeedSort::New => ranked.sort_by(by_newest),
            FeedSort::Top => ranked.sort_by(|a, b| {
                b.signals
                    .reaction_total
                    .cmp(&a.signals.reaction_total)
                    .then_with(|| by_newest(a, b))
            }),
            FeedSort::Hot => ranked.sort_by(|a, b| {
                b.score
                    .total_cmp(&a.score)
                    .then_with(|| b.post.id.cmp(&a.post.id))
            }),
        }

        ranked
    }
}

fn by_newest(a: &RankedPost, b: &RankedPost) -> Ordering {
    b.post
        .created_at
        .cmp(&a.post.created_at)
        .then_with(|| b.post.id.cmp(&a.post.id))
}
