//! Comment handlers
//!
//! Endpoints for comments, replies and threads.

use axum::{extract::State, Json};
use feed_service::dto::{
    CommentResponse, CommentsQuery, CreateCommentRequest, ThreadNodeResponse, UpdateCommentRequest,
};
use feed_service::CommentService;

use crate::extractors::{parse_query_id, CommentIdPath, PostIdPath, ValidatedJson, ValidatedQuery};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Add a comment or reply
///
/// POST /posts/{post_id}/comments
pub async fn create_comment(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Created<Json<CommentResponse>>> {
    let service = CommentService::new(state.service_context());
    let comment = service.create_comment(post_id, request)?;
    Ok(Created(Json(comment)))
}

/// Children of `parentId`, or top-level comments
///
/// GET /posts/{post_id}/comments
pub async fn list_comments(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
    ValidatedQuery(query): ValidatedQuery<CommentsQuery>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let parent_id = parse_query_id(query.parent_id.as_deref(), "parentId")?;

    let service = CommentService::new(state.service_context());
    Ok(Json(service.list_comments(post_id, parent_id)?))
}

/// GET /posts/{post_id}/thread
pub async fn get_thread(
    State(state): State<AppState>,
    PostIdPath(post_id): PostIdPath,
) -> ApiResult<Json<Vec<ThreadNodeResponse>>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.thread(post_id)?))
}

/// GET /comments/{comment_id}
pub async fn get_comment(
    State(state): State<AppState>,
    CommentIdPath(comment_id): CommentIdPath,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.get_comment(comment_id)?))
}

/// PATCH /comments/{comment_id}
pub async fn edit_comment(
    State(state): State<AppState>,
    CommentIdPath(comment_id): CommentIdPath,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let service = CommentService::new(state.service_context());
    Ok(Json(service.edit_comment(comment_id, request)?))
}

/// Tombstone a comment; repeating the call is harmless
///
/// DELETE /comments/{comment_id}
pub async fn delete_comment(
    State(state): State<AppState>,
    CommentIdPath(comment_id): CommentIdPath,
) -> ApiResult<NoContent> {
    let service = CommentService::new(state.service_context());
    service.delete_comment(comment_id)?;
    Ok(NoContent)
}
