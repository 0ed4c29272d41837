//! Reaction Model

use serde::{Deserialize, Serialize};

/// Emoji reaction; at most one row per (post, user, emoji)
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reaction {
    pub id: i64,
    pub emoji: String,
    pub post_id: i64,
    pub user_id: i64,
    pub created_at: i64,
}

/// Toggle reaction payload (`POST /api/posts/reactions`)
///
/// Fields are optional so a missing one is reported as a 400, not a
/// deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionToggle {
    pub post_id: Option<i64>,
    pub emoji: Option<String>,
}

/// Result of a toggle
///
/// `reaction` is the deleted row when `removed` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReactionToggled {
    pub success: bool,
    pub reaction: Reaction,
    pub removed: bool,
}
