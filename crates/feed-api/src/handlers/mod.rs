//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod comments;
pub mod feed;
pub mod health;
pub mod posts;
pub mod reactions;
