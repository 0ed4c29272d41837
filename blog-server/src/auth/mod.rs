//! Authentication
//!
//! - [`password`] - argon2 hashing and verification
//! - [`credentials`] - email/password sign-in check
//! - [`jwt`] - session token service
//! - [`session`] - session gate middleware and cookie transport

pub mod credentials;
pub mod jwt;
pub mod password;
pub mod session;

pub use credentials::authenticate;
pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use session::{SESSION_COOKIE, require_session};
