//! Configuration structs

mod app_config;

pub use app_config::{
    AppConfig, AppSettings, CommentConfig, ConfigError, CorsConfig, Environment, FeedConfig,
    RankingConfig, ServerConfig, SnowflakeConfig,
};
