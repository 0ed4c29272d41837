//! Auth API

use axum::{
    Extension, Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use http::header::SET_COOKIE;
use serde_json::json;
use shared::error::{AppError, AppResult};
use shared::models::{LoginRequest, LoginResponse, SessionResponse, SessionUser};

use super::JsonBody;
use crate::auth::session::{clear_session_cookie, session_cookie};
use crate::auth::{CurrentUser, authenticate};
use crate::state::AppState;

/// Public routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Routes behind the session gate
pub fn session_router() -> Router<AppState> {
    Router::new().route("/api/auth/session", get(session))
}

/// POST /api/auth/login
async fn login(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AppResult<impl IntoResponse> {
    let user = authenticate(&state.pool, &req.email, &req.password)
        .await
        .map_err(|e| e.context("Failed to sign in"))?;

    let token = state
        .jwt
        .generate_token(user.id, &user.username, Some(user.organization_id))
        .map_err(AppError::from)?;
    let cookie = session_cookie(&token, state.jwt.max_age_seconds(), state.cookie_secure)
        .ok_or_else(|| AppError::internal("Failed to create session"))?;

    Ok(([(SET_COOKIE, cookie)], Json(LoginResponse { token, user })))
}

/// POST /api/auth/logout
async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(SET_COOKIE, clear_session_cookie(state.cookie_secure))],
        Json(json!({ "success": true })),
    )
}

/// GET /api/auth/session
async fn session(Extension(user): Extension<CurrentUser>) -> AppResult<Json<SessionResponse>> {
    let scope = user.scope()?;
    Ok(Json(SessionResponse {
        user: SessionUser {
            id: user.id,
            username: user.username,
            organization_id: scope.organization_id,
        },
    }))
}
