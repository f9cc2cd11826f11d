//! Value objects - immutable identifiers and selectors

mod feed_sort;
mod snowflake;

pub use feed_sort::{FeedSort, FeedSortParseError};
pub use snowflake::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
