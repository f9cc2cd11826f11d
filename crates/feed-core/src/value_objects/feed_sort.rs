//! Feed ordering strategy selected per read

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Ordering applied to a feed read. There is no stored "current" sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedSort {
    /// Time-decayed engagement
    #[default]
    Hot,
    /// Newest first
    New,
    /// Most reactions first
    Top,
}

impl FeedSort {
    pub const ALL: [FeedSort; 3] = [FeedSort::Hot, FeedSort::New, FeedSort::Top];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hot => "hot",
            Self::New => "new",
            Self::Top => "top",
        }
    }
}

impl fmt::Display for FeedSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown feed sort: {0}")]
pub struct FeedSortParseError(pub String);

impl FromStr for FeedSort {
    type Err = FeedSortParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(Self::Hot),
            "new" => Ok(Self::New),
            "top" => Ok(Self::Top),
            _ => Err(FeedSortParseError(s.to_string())),
        }
    }
}
