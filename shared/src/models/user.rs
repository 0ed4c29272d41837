//! User Model

use serde::{Deserialize, Serialize};

/// User entity (row in `user`)
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    /// Display name
    pub name: Option<String>,
    /// Argon2 PHC string; users without one cannot sign in
    #[serde(skip)]
    pub password: Option<String>,
    pub organization_id: i64,
    pub created_at: i64,
}

/// Author summary embedded in posts and comments
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: i64,
    pub name: Option<String>,
    pub username: String,
}
