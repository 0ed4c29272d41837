//! HTTP surface
//!
//! - `/health` - liveness and database check
//! - `/api/auth/*` - sign-in, sign-out, session
//! - `/api/posts/*` - feed, posts, comments, reactions (session required)
//! - `/`, `/auth/login`, `/dashboard*` - session-gated pages

pub mod auth;
pub mod comments;
pub mod health;
pub mod pages;
pub mod posts;
pub mod reactions;

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::{Json, Router};
use axum::middleware;
use http::request::Parts;
use http::{HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use shared::error::{AppError, ErrorCode};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::require_session;
use crate::state::AppState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Request ID generator
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Build a router with all routes registered (no tower-http layers)
pub fn build_router(state: &AppState) -> Router<AppState> {
    let protected = Router::new()
        .merge(posts::router())
        .merge(auth::session_router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_session,
        ));

    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(pages::router())
        .merge(protected)
}

/// Build the fully layered application
///
/// Used by the HTTP server and by the integration tests.
pub fn build_app(state: AppState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);
    build_router(&state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(SetRequestIdLayer::new(request_id, XRequestId))
        .with_state(state)
}

/// JSON body extractor reporting malformed input as a 400 [`AppError`]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected request body");
    AppError::with_message(ErrorCode::InvalidRequest, "Invalid JSON body")
        .with_detail("reason", rejection.body_text())
}

/// Path parameter extractor reporting unparsable segments as a 400 [`AppError`]
pub struct PathParam<T>(pub T);

impl<S, T> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection(rejection)),
        }
    }
}

fn path_rejection(rejection: PathRejection) -> AppError {
    tracing::debug!(error = %rejection, "Rejected path parameter");
    AppError::with_message(ErrorCode::InvalidRequest, "Invalid path parameter")
        .with_detail("reason", rejection.body_text())
}
