//! Organization database operations

use shared::models::Organization;
use sqlx::SqlitePool;

use super::RepoResult;

pub async fn create(pool: &SqlitePool, name: &str, now: i64) -> RepoResult<Organization> {
    let org = Organization {
        id: shared::util::snowflake_id(),
        name: name.to_string(),
        created_at: now,
    };
    sqlx::query("INSERT INTO organization (id, name, created_at) VALUES (?1, ?2, ?3)")
        .bind(org.id)
        .bind(&org.name)
        .bind(org.created_at)
        .execute(pool)
        .await?;
    Ok(org)
}

pub async fn find_by_name(pool: &SqlitePool, name: &str) -> RepoResult<Option<Organization>> {
    let org = sqlx::query_as(
        "SELECT id, name, created_at FROM organization WHERE name = ?1 ORDER BY created_at LIMIT 1",
    )
    .bind(name)
    .fetch_optional(pool)
    .await?;
    Ok(org)
}
