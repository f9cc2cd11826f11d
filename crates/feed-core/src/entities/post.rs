//! Post reference - the slice of a post the engine needs to rank it

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Post identity and creation time
///
/// Post content is owned upstream; ranking only needs when the post was created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostRef {
    pub id: Snowflake,
    pub author_id: Snowflake,
    pub created_at: DateTime<Utc>,
}

impl PostRef {
    pub fn new(id: Snowflake, author_id: Snowflake, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            author_id,
            created_at,
        }
    }

    /// Milliseconds elapsed between creation and `now`, never negative
    pub fn age_millis(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_milliseconds().max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_age_millis() {
        let now = Utc::now();
        let post = PostRef::new(Snowflake::new(1), Snowflake::new(2), now - Duration::hours(1));
        assert_eq!(post.age_millis(now), 3_600_000);
    }

    #[test]
    fn test_future_post_has_zero_age() {
        let now = Utc::now();
        let post = PostRef::new(Snowflake::new(1), Snowflake::new(2), now + Duration::minutes(5));
        assert_eq!(post.age_millis(now), 0);
    }
}
