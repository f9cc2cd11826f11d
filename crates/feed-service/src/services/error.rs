//! Service layer error types
//!
//! Engine failures arrive as [`DomainError`] and keep their codes. Malformed
//! request fields (ids that do not parse, unknown sort names) become
//! `Validation`; unusable engine settings become `Config`.

use feed_common::{AppError, ConfigError};
use feed_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Domain(e) => e.status_code(),
            Self::Validation(_) => 400,
            Self::Config(_) => 500,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Config(_) => "CONFIG_ERROR",
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Domain(e) => AppError::Domain(e),
            ServiceError::Validation(msg) => AppError::Validation(msg),
            ServiceError::Config(e) => AppError::Config(e.to_string()),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
