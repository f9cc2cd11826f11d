//! Engagement aggregator
//!
//! Keeps per-post counters in step with the ledger and comment tree by
//! applying the deltas each mutation reports. Deltas are additive, so the
//! order concurrent writers land in does not change the final values.

use std::collections::HashMap;

use dashmap::DashMap;
use feed_core::Snowflake;
use serde::Serialize;

use super::ledger::ReactionChange;

/// Per-post engagement counters read by the ranker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementSignals {
    /// Live reactions of every kind
    pub reaction_total: u64,
    /// Weighted sum of live reactions
    pub sentiment: i64,
    /// Non-deleted comments
    pub comment_count: u64,
}

/// Anything the ranker can read engagement from
pub trait EngagementSource {
    /// Signals for a post; posts with no activity read as zero
    fn signals_of(&self, post_id: Snowflake) -> EngagementSignals;
}

impl EngagementSource for HashMap<Snowflake, EngagementSignals> {
    fn signals_of(&self, post_id: Snowflake) -> EngagementSignals {
        self.get(&post_id).copied().unwrap_or_default()
    }
}

#[derive(Debug, Default)]
pub struct EngagementAggregator {
    signals: DashMap<Snowflake, EngagementSignals>,
}

impl EngagementAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_reaction(&self, post_id: Snowflake, change: &ReactionChange) {
        let (total, sentiment) = (change.total_delta(), change.sentiment_delta());
        if total == 0 && sentiment == 0 {
            return;
        }
        let mut entry = self.signals.entry(post_id).or_default();
        entry.reaction_total = entry.reaction_total.saturating_add_signed(total);
        entry.sentiment += sentiment;
    }

    pub fn record_comment_added(&self, post_id: Snowflake) {
        self.signals.entry(post_id).or_default().comment_count += 1;
    }

    /// No-op for an untracked post; a removal never creates an entry
    pub fn record_comment_removed(&self, post_id: Snowflake) {
        if let Some(mut entry) = self.signals.get_mut(&post_id) {
            entry.comment_count = entry.comment_count.saturating_sub(1);
        }
    }

    pub fn forget(&self, post_id: Snowflake) {
        self.signals.remove(&post_id);
    }

    /// Copy of every tracked post's signals
    pub fn snapshot(&self) -> HashMap<Snowflake, EngagementSignals> {
        self.signals
            .iter()
            .map(|entry| (*entry.key(), *entry.value()))
            .collect()
    }
}

impl EngagementSource for EngagementAggregator {
    fn signals_of(&self, post_id: Snowflake) -> EngagementSignals {
        self.signals
            .get(&post_id)
            .map(|s| *s.value())
            .unwrap_or_default()
    }
}
