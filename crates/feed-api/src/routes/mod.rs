//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{comments, feed, health, posts, reactions};
use crate::state::AppState;

/// Create the main API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(post_routes())
        .merge(comment_routes())
        .route("/feed", get(feed::get_feed))
}

/// Post routes, including reactions and comments nested under a post
fn post_routes() -> Router<AppState> {
    Router::new()
        .route("/posts", post(posts::create_post))
        .route("/posts/:post_id", get(posts::get_post).delete(posts::delete_post))
        .route(
            "/posts/:post_id/reactions",
            get(reactions::get_reactions).post(reactions::react),
        )
        .route(
            "/posts/:post_id/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route("/posts/:post_id/thread", get(comments::get_thread))
}

/// Comment routes addressed by comment id
fn comment_routes() -> Router<AppState> {
    Router::new().route(
        "/comments/:comment_id",
        get(comments::get_comment)
            .patch(comments::edit_comment)
            .delete(comments::delete_comment),
    )
}
