//! In-memory engagement engine
//!
//! All state lives in concurrent maps keyed by post id, with one lock per post.
//! Nothing here performs I/O.

pub mod aggregator;
pub mod comment_tree;
pub mod ledger;
pub mod posts;
pub mod ranker;

pub use aggregator::{EngagementAggregator, EngagementSignals, EngagementSource};
pub use comment_tree::{CommentTree, ThreadEntry};
pub use ledger::{ReactionChange, ReactionLedger};
pub use posts::PostDirectory;
pub use ranker::{FeedRanker, RankedPost};
