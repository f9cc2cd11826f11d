//! Response types and error handling for API endpoints
//!
//! Every failure renders as `{"error": {"code", "message", "details"?}}` with
//! the status taken from the underlying error.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use feed_core::DomainError;
use feed_service::ServiceError;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};
use validator::ValidationErrors;

/// Part of the request that failed to extract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestPart {
    Path,
    Query,
    Body,
}

impl RequestPart {
    fn code(self) -> &'static str {
        match self {
            Self::Path => "INVALID_PATH_PARAMETER",
            Self::Query => "INVALID_QUERY_PARAMETER",
            Self::Body => "INVALID_BODY",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Service(#[from] ServiceError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{message}")]
    Malformed { part: RequestPart, message: String },
}

impl ApiError {
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::Service(e) => e.status_code(),
            Self::Domain(e) => e.status_code(),
            Self::Validation(_) | Self::Malformed { .. } => 400,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    #[must_use]
    pub fn error_code(&self) -> &str {
        match self {
            Self::Service(e) => e.error_code(),
            Self::Domain(e) => e.code(),
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Malformed { part, .. } => part.code(),
        }
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::malformed(RequestPart::Path, msg)
    }

    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::malformed(RequestPart::Query, msg)
    }

    pub fn invalid_body(msg: impl Into<String>) -> Self {
        Self::malformed(RequestPart::Body, msg)
    }

    fn malformed(part: RequestPart, msg: impl Into<String>) -> Self {
        Self::Malformed {
            part,
            message: msg.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    /// Field errors, only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            error!(error = ?self, "Request failed");
        } else if status == StatusCode::CONFLICT {
            warn!(code = self.error_code(), "Request conflicted");
        }

        let details = match &self {
            Self::Validation(errors) => serde_json::to_value(errors).ok(),
            _ => None,
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code: self.error_code().to_string(),
                message: self.to_string(),
                details,
            },
        };

        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// 201 around any response
pub struct Created<T>(pub T);

impl<T: IntoResponse> IntoResponse for Created<T> {
    fn into_response(self) -> Response {
        (StatusCode::CREATED, self.0).into_response()
    }
}

/// 204
pub struct NoContent;

impl IntoResponse for NoContent {
    fn into_response(self) -> Response {
        StatusCode::NO_CONTENT.into_response()
    }
}
