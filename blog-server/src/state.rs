//! Application state for blog-server

use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::{JwtConfig, JwtService};
use crate::config::Config;
use crate::db::{DbService, RepoResult};

/// Shared application state
///
/// Built once by the entry point (or a test) and handed to the router.
#[derive(Clone)]
pub struct AppState {
    /// SQLite connection pool
    pub pool: SqlitePool,
    /// Session token signer/verifier
    pub jwt: Arc<JwtService>,
    /// Mark the session cookie `Secure`
    pub cookie_secure: bool,
}

impl AppState {
    /// Open the configured database and build the state
    pub async fn new(config: &Config) -> RepoResult<Self> {
        let db = DbService::new(&config.database_url).await?;
        Ok(Self::with_pool(db.pool, config))
    }

    /// Build the state around an existing pool
    pub fn with_pool(pool: SqlitePool, config: &Config) -> Self {
        let jwt = JwtService::with_config(JwtConfig {
            secret: config.jwt_secret.clone(),
            expiration_minutes: config.jwt_expiration_minutes,
            issuer: config.jwt_issuer.clone(),
            audience: config.jwt_audience.clone(),
        });
        Self {
            pool,
            jwt: Arc::new(jwt),
            cookie_secure: config.cookie_secure,
        }
    }
}
