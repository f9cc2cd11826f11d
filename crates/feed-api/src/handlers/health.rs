//! Health check handler

use axum::Json;
use feed_service::dto::HealthResponse;

/// Liveness probe
///
/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
