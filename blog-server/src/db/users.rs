//! User database operations

use shared::models::User;
use sqlx::SqlitePool;

use super::{RepoError, RepoResult};

const USER_COLUMNS: &str = "id, email, username, name, password, organization_id, created_at";

/// Insert payload for a new user
#[derive(Debug, Clone, Copy)]
pub struct NewUser<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub name: Option<&'a str>,
    pub password_hash: Option<&'a str>,
    pub organization_id: i64,
}

pub async fn create(pool: &SqlitePool, data: NewUser<'_>, now: i64) -> RepoResult<User> {
    let user = User {
        id: shared::util::snowflake_id(),
        email: data.email.trim().to_lowercase(),
        username: data.username.to_string(),
        name: data.name.map(str::to_string),
        password: data.password_hash.map(str::to_string),
        organization_id: data.organization_id,
        created_at: now,
    };

    sqlx::query(
        "INSERT INTO user (id, email, username, name, password, organization_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(user.id)
    .bind(&user.email)
    .bind(&user.username)
    .bind(&user.name)
    .bind(&user.password)
    .bind(user.organization_id)
    .bind(user.created_at)
    .execute(pool)
    .await
    .map_err(|e| match RepoError::from(e) {
        RepoError::Duplicate(_) => {
            RepoError::Duplicate(format!("User '{}' already exists", user.email))
        }
        other => other,
    })?;

    Ok(user)
}

/// Look up by email (stored lower-cased)
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<User>> {
    let user = sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM user WHERE email = ?1"))
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::pool_with_user;

    #[tokio::test]
    async fn test_email_is_normalized() {
        let (pool, _org, user) = pool_with_user().await;
        let found = find_by_email(&pool, "  ALICE@acme.test ").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(found.password.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let (pool, org, _user) = pool_with_user().await;
        let err = create(
            &pool,
            NewUser {
                email: "alice@acme.test",
                username: "alice2",
                name: None,
                password_hash: None,
                organization_id: org.id,
            },
            2_000,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, RepoError::Duplicate(_)));
    }
}
