//! Data models
//!
//! Shared between blog-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are Snowflake `i64`, all timestamps Unix milliseconds.
//! JSON field names are camelCase to match the browser client.

pub mod auth;
pub mod comment;
pub mod organization;
pub mod post;
pub mod reaction;
pub mod tag;
pub mod user;

// Re-exports
pub use auth::*;
pub use comment::*;
pub use organization::*;
pub use post::*;
pub use reaction::*;
pub use tag::*;
pub use user::*;
