//! # feed-core
//!
//! Domain layer containing identifiers, entities and domain errors for the
//! feed engine. This crate has no knowledge of storage or transport.

pub mod entities;
pub mod error;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{Comment, PostRef, Reaction, ReactionKind, ReactionTally};
pub use error::DomainError;
pub use value_objects::{
    FeedSort, FeedSortParseError, Snowflake, SnowflakeGenerator, SnowflakeParseError,
};

/// Result alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
