//! Reaction API

use axum::{Extension, Json, extract::State};
use shared::error::AppResult;
use shared::models::{ReactionToggle, ReactionToggled};

use super::JsonBody;
use crate::auth::CurrentUser;
use crate::services;
use crate::state::AppState;

/// POST /api/posts/reactions - add, or remove when already present
pub async fn toggle(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    JsonBody(payload): JsonBody<ReactionToggle>,
) -> AppResult<Json<ReactionToggled>> {
    let scope = user.scope()?;
    let toggled = services::toggle_reaction(&state.pool, scope, user.id, payload)
        .await
        .map_err(|e| e.context("Failed to add reaction"))?;
    Ok(Json(toggled))
}
