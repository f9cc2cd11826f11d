//! Reaction ledger
//!
//! Tracks the live reaction of every actor on every post. Each (post, actor)
//! pair is a small state machine: `apply(kind)` on a pair already holding
//! `kind` clears it, anything else replaces the current reaction with `kind`.
//! Tally and sentiment of the post are updated in the same critical section.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use feed_core::{Reaction, ReactionKind, ReactionTally, Snowflake};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::trace;

/// Outcome of one `apply` call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionChange {
    /// Reaction the actor held before the call
    pub previous: Option<ReactionKind>,
    /// Reaction the actor holds after the call; `None` when toggled off
    pub applied: Option<ReactionKind>,
}

impl ReactionChange {
    /// Change in the number of live reactions on the post (-1, 0 or +1)
    pub fn total_delta(&self) -> i64 {
        i64::from(self.applied.is_some()) - i64::from(self.previous.is_some())
    }

    /// Change in the post's weighted sentiment
    pub fn sentiment_delta(&self) -> i64 {
        self.applied.map_or(0, ReactionKind::weight) - self.previous.map_or(0, ReactionKind::weight)
    }

    pub fn is_removal(&self) -> bool {
        self.applied.is_none()
    }
}

#[derive(Debug, Default)]
struct PostReactions {
    by_actor: HashMap<Snowflake, Reaction>,
    tally: ReactionTally,
    sentiment: i64,
}

/// Per-post reaction state behind fine-grained locks
///
/// Each post owns its own mutex; the map is only touched long enough to fetch
/// the post's slot, so a hot post never blocks reactions on other posts.
#[derive(Default)]
pub struct ReactionLedger {
    posts: DashMap<Snowflake, Arc<Mutex<PostReactions>>>,
}

impl ReactionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, post_id: Snowflake) -> Arc<Mutex<PostReactions>> {
        if let Some(slot) = self.posts.get(&post_id) {
            return Arc::clone(slot.value());
        }
        Arc::clone(self.posts.entry(post_id).or_default().value())
    }

    /// Toggle or replace `actor_id`'s reaction on `post_id`
    pub fn apply(
        &self,
        post_id: Snowflake,
        actor_id: Snowflake,
        kind: ReactionKind,
    ) -> ReactionChange {
        let slot = self.slot(post_id);
        let mut state = slot.lock();

        let previous = state.by_actor.get(&actor_id).map(|r| r.kind);
        let applied = if previous == Some(kind) { None } else { Some(kind) };

        if let Some(prev) = previous {
            state.tally.decrement(prev);
            state.sentiment -= prev.weight();
        }

        match applied {
            Some(next) => {
                state.tally.increment(next);
                state.sentiment += next.weight();
                state
                    .by_actor
                    .insert(actor_id, Reaction::new(post_id, actor_id, next));
            }
            None => {
                state.by_actor.remove(&actor_id);
            }
        }

        trace!(
            post_id = %post_id,
            actor_id = %actor_id,
            ?previous,
            ?applied,
            "Reaction ledger updated"
        );

        ReactionChange { previous, applied }
    }

    /// Snapshot of per-kind counts; unknown posts read as empty
    pub fn tally_of(&self, post_id: Snowflake) -> ReactionTally {
        self.posts
            .get(&post_id)
            .map(|slot| slot.lock().tally)
            .unwrap_or_default()
    }

    pub fn sentiment_of(&self, post_id: Snowflake) -> i64 {
        self.posts
            .get(&post_id)
            .map_or(0, |slot| slot.lock().sentiment)
    }

    /// The actor's live reaction on the post, if any
    pub fn reaction_of(&self, post_id: Snowflake, actor_id: Snowflake) -> Option<Reaction> {
        self.posts
            .get(&post_id)
            .and_then(|slot| slot.lock().by_actor.get(&actor_id).cloned())
    }

    /// Drop every reaction recorded for the post
    pub fn forget(&self, post_id: Snowflake) -> bool {
        self.posts.remove(&post_id).is_some()
    }

    /// Number of posts with ledger state
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }
}

impl std::fmt::Debug for ReactionLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReactionLedger")
            .field("posts", &self.posts.len())
            .finish()
    }
}
