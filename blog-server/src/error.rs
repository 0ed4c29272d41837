//! Unified service-layer error type for blog-server
//!
//! `ServiceError` bridges the gap between DB-layer errors (`RepoError`) and
//! the API-layer error (`AppError`), so services can use `?` on both.

use axum::response::IntoResponse;
use shared::error::AppError;

use crate::db::RepoError;

/// Service-layer error
///
/// - `Repo`: Database/infrastructure errors (mapped to InternalError, logged once when rendered)
/// - `App`: Business-rule errors (transparent pass-through to client)
#[derive(Debug)]
pub enum ServiceError {
    /// Database or infrastructure error
    Repo(RepoError),
    /// Business-rule error (already an AppError with the correct ErrorCode)
    App(AppError),
}

impl ServiceError {
    /// Convert to an `AppError`, using `message` as the client-facing text of
    /// infrastructure failures.
    pub fn context(self, message: &str) -> AppError {
        match self {
            ServiceError::App(app_err) => app_err,
            ServiceError::Repo(repo_err) => AppError::internal(message).with_cause(repo_err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(e: RepoError) -> Self {
        ServiceError::Repo(e)
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(e: sqlx::Error) -> Self {
        ServiceError::Repo(e.into())
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        e.context("Internal server error")
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

/// Convenience type alias for service-layer results
pub type ServiceResult<T> = Result<T, ServiceError>;
