//! Post API
//!
//! Everything under `/api/posts` requires a session; the comment and reaction
//! endpoints live here too so the gate covers them.

use axum::{
    Extension, Json, Router,
    extract::State,
    routing::{get, post},
};
use shared::error::AppResult;
use shared::models::{PostCreate, PostEnvelope, PostList};

use super::{JsonBody, PathParam, comments, reactions};
use crate::auth::CurrentUser;
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/posts", routes())
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_by_id))
        .route("/comments", post(comments::create))
        .route("/reactions", post(reactions::toggle))
}

/// GET /api/posts - published posts of the caller's organization
async fn list(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
) -> AppResult<Json<PostList>> {
    let scope = user.scope()?;
    let posts = services::list_posts(&state.pool, scope)
        .await
        .map_err(|e| e.context("Failed to fetch posts"))?;
    Ok(Json(PostList { posts }))
}

/// GET /api/posts/{id}
async fn get_by_id(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    PathParam(id): PathParam<i64>,
) -> AppResult<Json<PostEnvelope>> {
    let scope = user.scope()?;
    let post = services::get_post(&state.pool, scope, id)
        .await
        .map_err(|e| e.context("Failed to fetch post"))?;
    Ok(Json(PostEnvelope { post }))
}

/// POST /api/posts
async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<PostCreate>,
) -> AppResult<Json<PostEnvelope>> {
    let scope = user.scope()?;
    let post = services::create_post(&state.pool, scope, user.id, payload)
        .await
        .map_err(|e| e.context("Failed to create post"))?;
    Ok(Json(PostEnvelope { post }))
}
