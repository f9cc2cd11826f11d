//! Path parameter extractors
//!
//! Type-safe extraction of Snowflake IDs from path parameters.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};
use feed_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

/// `{post_id}` segment
#[derive(Debug, Clone, Copy)]
pub struct PostIdPath(pub Snowflake);

/// `{comment_id}` segment
#[derive(Debug, Clone, Copy)]
pub struct CommentIdPath(pub Snowflake);

#[derive(Debug, Deserialize)]
struct PostParams {
    post_id: String,
}

#[derive(Debug, Deserialize)]
struct CommentParams {
    comment_id: String,
}

fn parse(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

#[async_trait]
impl<S> FromRequestParts<S> for PostIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<PostParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        parse(&params.post_id, "post_id").map(Self)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CommentIdPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<CommentParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_path(e.body_text()))?;

        parse(&params.comment_id, "comment_id").map(Self)
    }
}

/// Parse an optional id carried in a query string
pub fn parse_query_id(raw: Option<&str>, name: &str) -> Result<Option<Snowflake>, ApiError> {
    raw.map(|value| {
        value
            .parse()
            .map_err(|_| ApiError::invalid_query(format!("Invalid {name} format")))
    })
    .transpose()
}
