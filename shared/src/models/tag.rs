//! Tag Model

use serde::{Deserialize, Serialize};

/// Tag entity
///
/// Names are not unique: every post creates its own tag rows.
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    pub id: i64,
    pub name: String,
}
