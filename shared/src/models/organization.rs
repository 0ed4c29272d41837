//! Organization Model

use serde::{Deserialize, Serialize};

/// Tenant boundary: every user and post belongs to exactly one organization
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub created_at: i64,
}
