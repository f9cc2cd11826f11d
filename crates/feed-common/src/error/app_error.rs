//! Application error types
//!
//! Process-level failures: startup, configuration and the server loop. Request
//! errors are rendered by the HTTP layer; they only reach this type when a
//! service call fails outside a request.

use std::io;
use std::net::SocketAddr;

use feed_core::DomainError;

use crate::config::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to bind to {addr}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("Server error")]
    Server(#[source] io::Error),
}

impl AppError {
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Domain(e) => e.status_code(),
            Self::Config(_) | Self::Bind { .. } | Self::Server(_) => 500,
        }
    }

    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Domain(e) => e.code(),
            Self::Config(_) => "CONFIG_ERROR",
            Self::Bind { .. } | Self::Server(_) => "SERVER_ERROR",
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
