//! Snowflake ID - 64-bit time-ordered identifier for posts, actors and comments
//!
//! Structure:
//! - Bits 63-22: Timestamp (milliseconds since custom epoch)
//! - Bits 21-12: Worker ID (0-1023)
//! - Bits 11-0:  Sequence number (0-4095)
//!
//! Ids handed out by one [`SnowflakeGenerator`] are strictly increasing, which is
//! what lets a comment's parent always carry a smaller id than the reply.

use chrono::{DateTime, TimeZone, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const WORKER_BITS: u32 = 10;
const SEQUENCE_BITS: u32 = 12;
const MAX_WORKER_ID: u16 = (1 << WORKER_BITS) - 1;
const MAX_SEQUENCE: i64 = (1 << SEQUENCE_BITS) - 1;

/// Time-ordered 64-bit identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Snowflake(i64);

impl Snowflake {
    /// Custom epoch: 2024-01-01 00:00:00 UTC (milliseconds)
    pub const EPOCH: i64 = 1_704_067_200_000;

    #[inline]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> i64 {
        self.0
    }

    /// Compose an id from its parts. `timestamp_ms` is milliseconds since the Unix epoch.
    pub fn from_parts(timestamp_ms: i64, worker_id: u16, sequence: u16) -> Self {
        let elapsed = (timestamp_ms - Self::EPOCH).max(0);
        Self(
            (elapsed << (WORKER_BITS + SEQUENCE_BITS))
                | (i64::from(worker_id & MAX_WORKER_ID) << SEQUENCE_BITS)
                | (i64::from(sequence) & MAX_SEQUENCE),
        )
    }

    /// Milliseconds since the Unix epoch encoded in this id
    #[inline]
    pub fn timestamp(&self) -> i64 {
        (self.0 >> (WORKER_BITS + SEQUENCE_BITS)) + Self::EPOCH
    }

    #[inline]
    pub fn worker_id(&self) -> u16 {
        ((self.0 >> SEQUENCE_BITS) & i64::from(MAX_WORKER_ID)) as u16
    }

    #[inline]
    pub fn sequence(&self) -> u16 {
        (self.0 & MAX_SEQUENCE) as u16
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp())
            .single()
            .unwrap_or_default()
    }

    pub fn parse(s: &str) -> Result<Self, SnowflakeParseError> {
        s.trim()
            .parse::<i64>()
            .map(Snowflake)
            .map_err(|_| SnowflakeParseError::InvalidFormat)
    }
}

/// Error when parsing a Snowflake from string
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SnowflakeParseError {
    #[error("invalid snowflake format")]
    InvalidFormat,
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Snowflake {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl From<Snowflake> for i64 {
    fn from(id: Snowflake) -> Self {
        id.0
    }
}

impl std::str::FromStr for Snowflake {
    type Err = SnowflakeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Snowflake::parse(s)
    }
}

// Serialized as a string so JavaScript clients keep all 64 bits
impl Serialize for Snowflake {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Snowflake {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Int(v) => Ok(Snowflake(v)),
            Repr::Text(s) => Snowflake::parse(&s).map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Default)]
struct GeneratorState {
    last_timestamp: i64,
    sequence: i64,
}

/// Thread-safe, strictly monotonic Snowflake generator
///
/// When the 4096 sequence slots of a millisecond are exhausted, or the wall clock
/// steps backwards, the generator keeps counting on a logical clock ahead of the
/// wall clock instead of sleeping.
#[derive(Debug)]
pub struct SnowflakeGenerator {
    worker_id: u16,
    state: Mutex<GeneratorState>,
}

impl SnowflakeGenerator {
    /// # Panics
    /// Panics if `worker_id >= 1024`
    pub fn new(worker_id: u16) -> Self {
        assert!(worker_id <= MAX_WORKER_ID, "Worker ID must be < 1024");
        Self {
            worker_id,
            state: Mutex::new(GeneratorState::default()),
        }
    }

    pub fn generate(&self) -> Snowflake {
        self.generate_at(Utc::now().timestamp_millis())
    }

    /// Generate an id for a wall-clock reading of `now_ms`
    pub fn generate_at(&self, now_ms: i64) -> Snowflake {
        let mut state = self.state.lock();

        if now_ms > state.last_timestamp {
            state.last_timestamp = now_ms;
            state.sequence = 0;
        } else if state.sequence == MAX_SEQUENCE {
            state.last_timestamp += 1;
            state.sequence = 0;
        } else {
            state.sequence += 1;
        }

        Snowflake::from_parts(state.last_timestamp, self.worker_id, state.sequence as u16)
    }

    pub fn worker_id(&self) -> u16 {
        self.worker_id
    }
}

impl Default for SnowflakeGenerator {
    fn default() -> Self {
        Self::new(0)
    }
}
