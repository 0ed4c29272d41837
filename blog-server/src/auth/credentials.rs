//! Email/password sign-in

use shared::error::AppError;
use shared::models::AuthenticatedUser;
use sqlx::SqlitePool;

use super::password::verify_password;
use crate::db::users;
use crate::error::ServiceResult;

/// Check a credential pair
///
/// Unknown email, account without a password, and wrong password all fail
/// with the same `InvalidCredentials` error.
pub async fn authenticate(
    pool: &SqlitePool,
    email: &str,
    password: &str,
) -> ServiceResult<AuthenticatedUser> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::invalid_credentials().into());
    }

    let Some(user) = users::find_by_email(pool, email).await? else {
        tracing::warn!(target: "security", email = %email, "Login failed: unknown email");
        return Err(AppError::invalid_credentials().into());
    };

    let Some(hash) = user.password.as_deref() else {
        tracing::warn!(target: "security", user_id = user.id, "Login failed: account has no password");
        return Err(AppError::invalid_credentials().into());
    };

    if !verify_password(password, hash) {
        tracing::warn!(target: "security", user_id = user.id, "Login failed: wrong password");
        return Err(AppError::invalid_credentials().into());
    }

    tracing::info!(user_id = user.id, username = %user.username, "User signed in");

    Ok(AuthenticatedUser {
        id: user.id,
        email: user.email,
        name: user.name,
        username: user.username,
        organization_id: user.organization_id,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::hash_password;
    use crate::db::DbService;
    use crate::db::{organizations, users::NewUser};
    use shared::error::ErrorCode;
    use shared::util::now_millis;

    async fn setup() -> SqlitePool {
        let pool = DbService::in_memory().await.unwrap().pool;
        let org = organizations::create(&pool, "Acme", now_millis()).await.unwrap();
        let hash = hash_password("password123").unwrap();
        users::create(
            &pool,
            NewUser {
                email: "bob@acme.test",
                username: "bob",
                name: Some("Bob"),
                password_hash: Some(&hash),
                organization_id: org.id,
            },
            now_millis(),
        )
        .await
        .unwrap();
        users::create(
            &pool,
            NewUser {
                email: "nopass@acme.test",
                username: "nopass",
                name: None,
                password_hash: None,
                organization_id: org.id,
            },
            now_millis(),
        )
        .await
        .unwrap();
        pool
    }

    fn code(err: crate::error::ServiceError) -> ErrorCode {
        AppError::from(err).code
    }

    #[tokio::test]
    async fn test_valid_credentials() {
        let pool = setup().await;
        let user = authenticate(&pool, "bob@acme.test", "password123").await.unwrap();
        assert_eq!(user.username, "bob");
        assert_eq!(user.name.as_deref(), Some("Bob"));
        assert!(user.organization_id > 0);
    }

    #[tokio::test]
    async fn test_email_is_case_insensitive() {
        let pool = setup().await;
        assert!(authenticate(&pool, "  BOB@acme.test ", "password123").await.is_ok());
    }

    #[tokio::test]
    async fn test_failures_are_indistinguishable() {
        let pool = setup().await;
        for (email, password) in [
            ("bob@acme.test", "wrong"),
            ("nobody@acme.test", "password123"),
            ("nopass@acme.test", "password123"),
            ("", "password123"),
            ("bob@acme.test", ""),
        ] {
            let err = authenticate(&pool, email, password).await.unwrap_err();
            assert_eq!(code(err), ErrorCode::InvalidCredentials, "{email}/{password}");
        }
    }
}
