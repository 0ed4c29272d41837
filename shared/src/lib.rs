//! Shared types for the organization blog
//!
//! Error system, data models and request/response payloads used by
//! blog-server and by anything that talks to its JSON API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::Json;
pub use serde::{Deserialize, Serialize};
