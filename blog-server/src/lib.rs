//! blog-server - internal organization blog
//!
//! Organizations, users, markdown posts with tags, threaded comments and
//! emoji reactions behind a JSON API and a few session-gated pages.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod logger;
pub mod seed;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use state::AppState;
