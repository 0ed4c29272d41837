//! Database Module
//!
//! Owns the SQLite connection pool, applies migrations and exposes one
//! module of query functions per table.

pub mod comments;
pub mod organizations;
pub mod posts;
pub mod reactions;
pub mod tags;
pub mod users;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::str::FromStr;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                RepoError::Duplicate(db.message().to_string())
            }
            sqlx::Error::RowNotFound => RepoError::NotFound("row".to_string()),
            _ => RepoError::Database(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for RepoError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        RepoError::Database(format!("Failed to apply migrations: {err}"))
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Which posts a relation query covers.
///
/// Every variant carries the organization id: there is no way to read posts
/// without naming the tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostScope {
    /// All published posts of an organization (the feed)
    Feed { organization_id: i64 },
    /// One post, whether published or not, if it belongs to the organization
    Single { organization_id: i64, post_id: i64 },
}

impl PostScope {
    /// Append the filter on the `p` (post) alias
    pub(crate) fn push_filter(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        match *self {
            PostScope::Feed { organization_id } => {
                qb.push(" WHERE p.organization_id = ")
                    .push_bind(organization_id)
                    .push(" AND p.published = 1");
            }
            PostScope::Single {
                organization_id,
                post_id,
            } => {
                qb.push(" WHERE p.organization_id = ")
                    .push_bind(organization_id)
                    .push(" AND p.id = ")
                    .push_bind(post_id);
            }
        }
    }
}

/// Database service, owns the SQLite connection pool
#[derive(Clone)]
pub struct DbService {
    pub pool: SqlitePool,
}

impl DbService {
    /// Open (or create) the database at `url` with WAL and foreign keys, then migrate
    pub async fn new(url: &str) -> RepoResult<Self> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| RepoError::Database(format!("Invalid database url: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(std::time::Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        tracing::info!("Database connection established (SQLite WAL, busy_timeout=5000ms)");

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    /// Single-connection in-memory database, migrated. Each call is isolated.
    pub async fn in_memory() -> RepoResult<Self> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| RepoError::Database(e.to_string()))?
            .foreign_keys(true);

        // Every connection to :memory: is a separate database, so keep exactly one.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> RepoResult<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::debug!("Database migrations applied");
        Ok(())
    }
}
