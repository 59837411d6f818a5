use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Extension, Json,
};
use std::sync::Arc;

use crate::{
    errors::AppError,
    extractors::AppJson,
    middlewares::auth::JwtClaims,
    models::post::{CreateCommentRequest, CreatePostRequest, CreatePostResponse},
    services::{post_service::PostService, AppState},
};

/// POST /api/posts (requires JWT)
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<JwtClaims>,
    AppJson(req): AppJson<CreatePostRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = PostService::new(state.db.clone(), state.events.clone());
    let post = service.create_post(&claims.sub, req).await?;
    Ok(Json(CreatePostResponse { ok: true, post }))
}

/// GET /api/posts
pub async fn list_posts(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let service = PostService::new(state.db.clone(), state.events.clone());
    let posts = service.list_posts().await?;
    Ok(Json(posts))
}

/// POST /api/posts/{id}/comments
pub async fn create_comment(
    State(state): State<Arc<AppState>>,
    Path(post_id): Path<String>,
    AppJson(req): AppJson<CreateCommentRequest>,
) -> Result<impl IntoResponse, AppError> {
    let service = PostService::new(state.db.clone(), state.events.clone());
    let comment = service.add_comment(&post_id, req).await?;
    Ok(Json(comment))
}
