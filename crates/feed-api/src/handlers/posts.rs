//! Post handlers
//!
//! Endpoints for registering and removing posts.

use axum::{extract::State, Json};
use feed_service::dto::{CreatePostRequest, PostResponse};
use feed_service::PostService;

use crate::extractors::{PostIdPath, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a post
///
/// POST /posts
pub async fn create_post(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> ApiResult<Created<Json<PostResponse>>> {
    let service = PostService::new(state.service_context());
    let post = service.create_post(request)?;
    Ok(Created(Json(post)))
}

/// Get a post with its engagement
///
/// GET /posts/{post_id}
pub async fn get_post(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<Json<PostResponse>> {
    let service = PostService::new(state.service_context());
    Ok(Json(service.get_post(post_id)?))
}

/// Forget a post and its reactions and comments
///
/// DELETE /posts/{post_id}
pub async fn delete_post(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<NoContent> {
    let service = PostService::new(state.service_context());
    service.delete_post(post_id)?;
    Ok(NoContent)
}
