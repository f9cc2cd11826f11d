//! Feed handler

use axum::{extract::State, Json};
use feed_service::dto::{FeedQuery, FeedResponse};
use feed_service::FeedService;

use crate::extractors::ValidatedQuery;
use crate::response::ApiResult;
use crate::state::AppState;

/// Ranked posts with their signals
///
/// GET /feed?sort=hot|new|top&limit=
pub async fn get_feed(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<FeedQuery>,
) -> ApiResult<Json<FeedResponse>> {
    let service = FeedService::new(state.service_context());
    Ok(Json(service.feed(query)?))
}
