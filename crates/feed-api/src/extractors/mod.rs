//! Axum extractors for request handling
//!
//! Custom extractors for path ids and validated bodies and queries.

mod path;
mod validated;

pub use path::{parse_query_id, CommentIdPath, PostIdPath};
pub use validated::{ValidatedJson, ValidatedQuery};
