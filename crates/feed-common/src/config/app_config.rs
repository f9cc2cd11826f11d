//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file if present).

use serde::Deserialize;
use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
    pub ranking: RankingConfig,
    pub feed: FeedConfig,
    pub comments: CommentConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }

    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "production" => Some(Self::Production),
            "staging" => Some(Self::Staging),
            "development" => Some(Self::Development),
            _ => None,
        }
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// CORS configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CorsConfig {
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

/// Hot-score parameters
///
/// `hot = (reactions + comments * comment_weight) / (1 + age_ms / decay_millis)`.
/// The defaults are the production constants.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct RankingConfig {
    #[serde(default = "default_decay_millis")]
    pub decay_millis: f64,
    #[serde(default = "default_comment_weight")]
    pub comment_weight: f64,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            decay_millis: default_decay_millis(),
            comment_weight: default_comment_weight(),
        }
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.decay_millis.is_finite() || self.decay_millis <= 0.0 {
            return Err(ConfigError::InvalidValue(
                "RANK_DECAY_MILLIS",
                self.decay_millis.to_string(),
            ));
        }
        if !self.comment_weight.is_finite() || self.comment_weight < 0.0 {
            return Err(ConfigError::InvalidValue(
                "RANK_COMMENT_WEIGHT",
                self.comment_weight.to_string(),
            ));
        }
        Ok(())
    }
}

/// Feed read limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_feed_limit")]
    pub default_limit: usize,
    #[serde(default = "default_feed_max_limit")]
    pub max_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_limit: default_feed_limit(),
            max_limit: default_feed_max_limit(),
        }
    }
}

impl FeedConfig {
    /// Clamp a requested page size into `1..=max_limit`
    #[must_use]
    pub fn clamp_limit(&self, requested: Option<usize>) -> usize {
        requested
            .unwrap_or(self.default_limit)
            .clamp(1, self.max_limit.max(1))
    }
}

/// Comment payload limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct CommentConfig {
    #[serde(default = "default_comment_max_length")]
    pub max_length: usize,
}

impl Default for CommentConfig {
    fn default() -> Self {
        Self {
            max_length: default_comment_max_length(),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "feed-engine".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_decay_millis() -> f64 {
    3_600_000.0 // one hour
}

fn default_comment_weight() -> f64 {
    2.0
}

fn default_feed_limit() -> usize {
    50
}

fn default_feed_max_limit() -> usize {
    200
}

fn default_comment_max_length() -> usize {
    4000
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a value does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ranking = RankingConfig {
            decay_millis: parse_or(&lookup, "RANK_DECAY_MILLIS", default_decay_millis)?,
            comment_weight: parse_or(&lookup, "RANK_COMMENT_WEIGHT", default_comment_weight)?,
        };
        ranking.validate()?;

        let worker_id: u16 = parse_or(&lookup, "WORKER_ID", || 0)?;
        if worker_id >= 1024 {
            return Err(ConfigError::InvalidValue("WORKER_ID", worker_id.to_string()));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: lookup("APP_ENV")
                    .and_then(|s| Environment::parse(&s))
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: lookup("API_HOST").unwrap_or_else(default_host),
                port: lookup("API_PORT")
                    .ok_or(ConfigError::MissingVar("API_PORT"))
                    .and_then(|s| {
                        s.trim()
                            .parse()
                            .map_err(|_| ConfigError::InvalidValue("API_PORT", s))
                    })?,
            },
            cors: CorsConfig {
                allowed_origins: lookup("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig { worker_id },
            ranking,
            feed: FeedConfig {
                default_limit: parse_or(&lookup, "FEED_DEFAULT_LIMIT", default_feed_limit)?,
                max_limit: parse_or(&lookup, "FEED_MAX_LIMIT", default_feed_max_limit)?,
            },
            comments: CommentConfig {
                max_length: parse_or(&lookup, "COMMENT_MAX_LENGTH", default_comment_max_length)?,
            },
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: fn() -> T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        None => Ok(default()),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
