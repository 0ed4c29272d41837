//! Session gate
//!
//! The session token travels in the `blog_session` cookie (browser) or an
//! `Authorization: Bearer <token>` header (scripts). A valid token puts a
//! [`CurrentUser`] into the request extensions; anything else is treated as
//! "no session".

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use http::{HeaderMap, HeaderValue, header};
use shared::error::AppError;

use super::{CurrentUser, JwtService};
use crate::state::AppState;

/// Name of the session cookie
pub const SESSION_COOKIE: &str = "blog_session";

/// Extract the token from `Authorization: Bearer <token>`
pub fn extract_from_header(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Extract the token from the `Cookie` headers
fn extract_from_cookies(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|t| !t.is_empty())
}

/// Bearer header first, then the session cookie
pub fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_from_header)
        .or_else(|| extract_from_cookies(headers))
}

/// Resolve the session subject, if any
pub fn session_user(jwt: &JwtService, headers: &HeaderMap) -> Option<CurrentUser> {
    let token = token_from_headers(headers)?;
    match jwt.validate_token(token).and_then(CurrentUser::try_from) {
        Ok(user) => Some(user),
        Err(e) => {
            tracing::debug!(error = %e, "Session token rejected");
            None
        }
    }
}

/// Reject requests without a valid session (401 `Unauthorized`)
///
/// Runs before the handler, so a rejected request never reaches the store.
pub async fn require_session(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    match session_user(&state.jwt, req.headers()) {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => {
            tracing::warn!(
                target: "security",
                method = %req.method(),
                uri = %req.uri(),
                "Request without a valid session"
            );
            Err(AppError::unauthorized())
        }
    }
}

/// `Set-Cookie` value establishing a session
pub fn session_cookie(token: &str, max_age_seconds: i64, secure: bool) -> Option<HeaderValue> {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={max_age_seconds}"
    );
    if secure {
        cookie.push_str("; Secure");
    }
    HeaderValue::from_str(&cookie).ok()
}

/// `Set-Cookie` value ending the session
pub fn clear_session_cookie(secure: bool) -> HeaderValue {
    if secure {
        HeaderValue::from_static("blog_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0; Secure")
    } else {
        HeaderValue::from_static("blog_session=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0")
    }
}
