//! Integration test utilities for the feed API
//!
//! Helpers for running end-to-end tests against the REST API. The engine is
//! in-memory, so no external services are needed.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
