//! Session-gated pages
//!
//! Static HTML shells; all data comes from the JSON API.

use axum::{
    Router,
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
};
use http::HeaderMap;

use crate::auth::session::session_user;
use crate::state::AppState;

const LOGIN_PAGE: &str = include_str!("../../static/login.html");
const DASHBOARD_PAGE: &str = include_str!("../../static/dashboard.html");
const FEED_PAGE: &str = include_str!("../../static/feed.html");

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/auth/login", get(login))
        .route("/dashboard", get(dashboard))
        .route("/dashboard/feed", get(feed))
}

fn signed_in(state: &AppState, headers: &HeaderMap) -> bool {
    session_user(&state.jwt, headers).is_some()
}

/// GET /
async fn index(State(state): State<AppState>, headers: HeaderMap) -> Redirect {
    if signed_in(&state, &headers) {
        Redirect::temporary("/dashboard")
    } else {
        Redirect::temporary("/auth/login")
    }
}

/// GET /auth/login
async fn login(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if signed_in(&state, &headers) {
        Redirect::temporary("/dashboard").into_response()
    } else {
        Html(LOGIN_PAGE).into_response()
    }
}

/// GET /dashboard
async fn dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    gated(&state, &headers, DASHBOARD_PAGE)
}

/// GET /dashboard/feed
async fn feed(State(state): State<AppState>, headers: HeaderMap) -> Response {
    gated(&state, &headers, FEED_PAGE)
}

fn gated(state: &AppState, headers: &HeaderMap, page: &'static str) -> Response {
    if signed_in(state, headers) {
        Html(page).into_response()
    } else {
        Redirect::temporary("/auth/login").into_response()
    }
}
