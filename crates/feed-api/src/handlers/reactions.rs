//! Reaction handlers

use axum::{extract::State, Json};
use feed_service::dto::{
    ReactRequest, ReactionChangeResponse, ReactionQuery, ReactionSummaryResponse,
};
use feed_service::ReactionService;

use crate::extractors::{parse_query_id, PostIdPath, ValidatedJson, ValidatedQuery};
use crate::response::ApiResult;
use crate::state::AppState;

/// Toggle or replace the actor's reaction
///
/// POST /posts/{post_id}/reactions
pub async fn react(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
    ValidatedJson(request): ValidatedJson<ReactRequest>,
) -> ApiResult<Json<ReactionChangeResponse>> {
    let service = ReactionService::new(state.service_context());
    Ok(Json(service.react(post_id, request)?))
}

/// Tally of a post; `actorId` adds that actor's own reaction
///
/// GET /posts/{post_id}/reactions
pub async fn get_reactions(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
    ValidatedQuery(query): ValidatedQuery<ReactionQuery>,
) -> ApiResult<Json<ReactionSummaryResponse>> {
    let actor_id = parse_query_id(query.actor_id.as_deref(), "actorId")?;

    let service = ReactionService::new(state.service_context());
    Ok(Json(service.summary(post_id, actor_id)?))
}
