//! Comment API

use axum::{Extension, Json, extract::State};
use shared::error::AppResult;
use shared::models::{CommentCreate, CommentCreated};

use super::JsonBody;
use crate::auth::CurrentUser;
use crate::services;
use crate::state::AppState;

/// POST /api/posts/comments
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<CommentCreate>,
) -> AppResult<Json<CommentCreated>> {
    let scope = user.scope()?;
    let comment = services::add_comment(&state.pool, scope, user.id, payload)
        .await
        .map_err(|e| e.context("Failed to add comment"))?;
    Ok(Json(CommentCreated {
        success: true,
        comment,
    }))
}
