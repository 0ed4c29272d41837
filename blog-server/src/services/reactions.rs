//! Reaction service
//!
//! Toggle semantics: reacting twice with the same emoji removes the reaction.

use shared::error::{AppError, ErrorCode};
use shared::models::{Reaction, ReactionToggle, ReactionToggled};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::{OrgScope, non_blank};
use crate::db::{RepoError, posts, reactions};
use crate::error::ServiceResult;

/// Longest accepted emoji, in characters
pub const MAX_EMOJI_CHARS: usize = 32;

/// Add the reaction, or remove it if the user already reacted with this emoji
///
/// The transaction takes the write lock up front and inserts first, so
/// identical concurrent toggles queue behind each other. An insert that hits
/// the unique constraint means "already reacted" and removes the row.
pub async fn toggle_reaction(
    pool: &SqlitePool,
    scope: OrgScope,
    user_id: i64,
    input: ReactionToggle,
) -> ServiceResult<ReactionToggled> {
    let emoji = non_blank(input.emoji.as_deref());
    let (Some(post_id), Some(emoji)) = (input.post_id, emoji) else {
        let mut missing = Vec::new();
        if input.post_id.is_none() {
            missing.push("postId");
        }
        if emoji.is_none() {
            missing.push("emoji");
        }
        return Err(AppError::required(&missing).into());
    };
    if emoji.chars().count() > MAX_EMOJI_CHARS {
        return Err(AppError::new(ErrorCode::InvalidEmoji)
            .with_detail("maxLength", MAX_EMOJI_CHARS)
            .into());
    }

    if posts::find_in_org(pool, post_id, scope.organization_id)
        .await?
        .is_none()
    {
        return Err(AppError::new(ErrorCode::PostNotFound).into());
    }

    let mut tx = pool.begin_with("BEGIN IMMEDIATE").await?;

    let reaction = Reaction {
        id: snowflake_id(),
        emoji: emoji.to_string(),
        post_id,
        user_id,
        created_at: now_millis(),
    };
    if reactions::insert(&mut *tx, &reaction).await? {
        tx.commit().await?;
        tracing::info!(reaction_id = reaction.id, post_id, user_id, emoji, "Reaction added");
        return Ok(ReactionToggled {
            success: true,
            reaction,
            removed: false,
        });
    }

    let existing = reactions::find(&mut *tx, post_id, user_id, emoji)
        .await?
        .ok_or_else(|| RepoError::Database("reaction conflict without a row".into()))?;
    reactions::delete(&mut *tx, existing.id).await?;
    tx.commit().await?;

    tracing::info!(reaction_id = existing.id, post_id, user_id, emoji, "Reaction removed");
    Ok(ReactionToggled {
        success: true,
        reaction: existing,
        removed: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::pool_with_user;
    use crate::db::{DbService, organizations, users};
    use crate::services::posts::{create_post, get_post};
    use shared::models::PostCreate;

    async fn setup() -> (SqlitePool, OrgScope, i64, i64) {
        let (pool, org, user) = pool_with_user().await;
        let scope = OrgScope::new(org.id);
        let post = create_post(
            &pool,
            scope,
            user.id,
            PostCreate {
                title: Some("t".into()),
                content: Some("c".into()),
                tags: None,
            },
        )
        .await
        .unwrap();
        (pool, scope, user.id, post.post.id)
    }

    fn toggle(post_id: i64, emoji: &str) -> ReactionToggle {
        ReactionToggle {
            post_id: Some(post_id),
            emoji: Some(emoji.into()),
        }
    }

    #[tokio::test]
    async fn test_toggle_is_an_involution() {
        let (pool, scope, user_id, post_id) = setup().await;

        let added = toggle_reaction(&pool, scope, user_id, toggle(post_id, "👍"))
            .await
            .unwrap();
        assert!(!added.removed);
        assert_eq!(added.reaction.emoji, "👍");
        assert_eq!(get_post(&pool, scope, post_id).await.unwrap().reactions.len(), 1);

        let removed = toggle_reaction(&pool, scope, user_id, toggle(post_id, "👍"))
            .await
            .unwrap();
        assert!(removed.removed);
        assert_eq!(removed.reaction.id, added.reaction.id);
        assert!(get_post(&pool, scope, post_id).await.unwrap().reactions.is_empty());
    }

    #[tokio::test]
    async fn test_different_emoji_coexist() {
        let (pool, scope, user_id, post_id) = setup().await;
        for emoji in ["👍", "🎉", " 👍 "] {
            toggle_reaction(&pool, scope, user_id, toggle(post_id, emoji))
                .await
                .unwrap();
        }
        // " 👍 " trims to the first emoji and removes it
        let reactions = get_post(&pool, scope, post_id).await.unwrap().reactions;
        assert_eq!(reactions.len(), 1);
        assert_eq!(reactions[0].emoji, "🎉");
    }

    #[tokio::test]
    async fn test_invalid_input() {
        let (pool, scope, user_id, post_id) = setup().await;

        let err = toggle_reaction(&pool, scope, user_id, toggle(post_id, "  "))
            .await
            .unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::RequiredField);

        let long = "x".repeat(MAX_EMOJI_CHARS + 1);
        let err = toggle_reaction(&pool, scope, user_id, toggle(post_id, &long))
            .await
            .unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::InvalidEmoji);

        let err = toggle_reaction(&pool, OrgScope::new(-1), user_id, toggle(post_id, "👍"))
            .await
            .unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::PostNotFound);
    }

    #[tokio::test]
    async fn test_existing_row_counts_as_already_reacted() {
        let (pool, scope, user_id, post_id) = setup().await;
        let stored = Reaction {
            id: snowflake_id(),
            emoji: "🔥".into(),
            post_id,
            user_id,
            created_at: now_millis(),
        };
        let mut conn = pool.acquire().await.unwrap();
        assert!(reactions::insert(&mut conn, &stored).await.unwrap());
        assert!(!reactions::insert(&mut conn, &stored).await.unwrap());
        drop(conn);

        let toggled = toggle_reaction(&pool, scope, user_id, toggle(post_id, "🔥"))
            .await
            .unwrap();
        assert!(toggled.removed);
        assert_eq!(toggled.reaction.id, stored.id);
        assert!(get_post(&pool, scope, post_id).await.unwrap().reactions.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_identical_toggles_serialize() {
        let path = std::env::temp_dir().join(format!("blog-reactions-{}.db", snowflake_id()));
        let db = DbService::new(&format!("sqlite://{}", path.display()))
            .await
            .unwrap();
        let pool = db.pool.clone();

        let org = organizations::create(&pool, "Race", 1_000).await.unwrap();
        let user = users::create(
            &pool,
            users::NewUser {
                email: "race@race.test",
                username: "race",
                name: None,
                password_hash: None,
                organization_id: org.id,
            },
            1_000,
        )
        .await
        .unwrap();
        let scope = OrgScope::new(org.id);
        let post = create_post(
            &pool,
            scope,
            user.id,
            PostCreate {
                title: Some("t".into()),
                content: Some("c".into()),
                tags: None,
            },
        )
        .await
        .unwrap();
        let (post_id, user_id) = (post.post.id, user.id);

        for _ in 0..20 {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let pool = pool.clone();
                    tokio::spawn(async move {
                        toggle_reaction(&pool, scope, user_id, toggle(post_id, "👍")).await
                    })
                })
                .collect();

            let mut removed = 0;
            for handle in handles {
                let toggled = handle.await.unwrap().unwrap();
                if toggled.removed {
                    removed += 1;
                }
            }
            // Four toggles in strict alternation: two adds, two removals
            assert_eq!(removed, 2);

            let rows: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM reaction WHERE post_id = ?1 AND user_id = ?2 AND emoji = ?3",
            )
            .bind(post_id)
            .bind(user_id)
            .bind("👍")
            .fetch_one(&pool)
            .await
            .unwrap();
            assert_eq!(rows, 0);
        }

        pool.close().await;
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
        }
    }
}
