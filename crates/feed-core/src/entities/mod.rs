//! Domain entities - posts, comments and reactions

mod comment;
mod post;
mod reaction;

pub use comment::Comment;
pub use post::PostRef;
pub use reaction::{Reaction, ReactionKind, ReactionTally};
