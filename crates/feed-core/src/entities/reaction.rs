//! Reaction entities - the closed set of reaction kinds and per-post tallies

use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Reaction kind with a fixed signed sentiment weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ReactionKind {
    Bull,
    Bear,
    Smart,
    Funny,
    Fire,
    Gem,
    Rug,
}

impl ReactionKind {
    pub const COUNT: usize = 7;

    pub const ALL: [ReactionKind; Self::COUNT] = [
        Self::Bull,
        Self::Bear,
        Self::Smart,
        Self::Funny,
        Self::Fire,
        Self::Gem,
        Self::Rug,
    ];

    /// Signed contribution of one live reaction to a post's sentiment
    #[inline]
    pub const fn weight(self) -> i64 {
        match self {
            Self::Bull => 2,
            Self::Bear => -2,
            Self::Smart => 3,
            Self::Funny => 1,
            Self::Fire => 2,
            Self::Gem => 4,
            Self::Rug => -1,
        }
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bull => "BULL",
            Self::Bear => "BEAR",
            Self::Smart => "SMART",
            Self::Funny => "FUNNY",
            Self::Fire => "FIRE",
            Self::Gem => "GEM",
            Self::Rug => "RUG",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| DomainError::InvalidReactionKind(s.to_string()))
    }
}

/// A live reaction of one actor on one post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub post_id: Snowflake,
    pub actor_id: Snowflake,
    pub kind: ReactionKind,
    pub created_at: DateTime<Utc>,
}

impl Reaction {
    pub fn new(post_id: Snowflake, actor_id: Snowflake, kind: ReactionKind) -> Self {
        Self {
            post_id,
            actor_id,
            kind,
            created_at: Utc::now(),
        }
    }
}

/// Per-kind reaction counts of a post
///
/// Serializes as a map from kind name to count, every kind present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReactionTally {
    counts: [u64; ReactionKind::COUNT],
}

impl ReactionTally {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, kind: ReactionKind) -> u64 {
        self.counts[kind.index()]
    }

    pub fn increment(&mut self, kind: ReactionKind) {
        self.counts[kind.index()] += 1;
    }

    pub fn decrement(&mut self, kind: ReactionKind) {
        let slot = &mut self.counts[kind.index()];
        *slot = slot.saturating_sub(1);
    }

    /// Unweighted number of live reactions
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Weighted sum over all live reactions
    pub fn sentiment(&self) -> i64 {
        self.iter()
            .map(|(kind, count)| kind.weight() * count as i64)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ReactionKind, u64)> + '_ {
        ReactionKind::ALL
            .into_iter()
            .map(|kind| (kind, self.counts[kind.index()]))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl FromIterator<(ReactionKind, u64)> for ReactionTally {
    fn from_iter<I: IntoIterator<Item = (ReactionKind, u64)>>(iter: I) -> Self {
        let mut tally = Self::default();
        for (kind, count) in iter {
            tally.counts[kind.index()] += count;
        }
        tally
    }
}

impl Serialize for ReactionTally {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(ReactionKind::COUNT))?;
        for (kind, count) in self.iter() {
            map.serialize_entry(kind.as_str(), &count)?;
        }
        map.end()
    }
}
