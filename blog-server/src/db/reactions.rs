//! Reaction database operations
//!
//! `reaction` carries `UNIQUE (post_id, user_id, emoji)`; [`insert`] reports a
//! conflicting row instead of failing.

use shared::models::Reaction;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use super::{PostScope, RepoResult};

const REACTION_COLUMNS: &str = "r.id, r.emoji, r.post_id, r.user_id, r.created_at";

pub async fn find(
    conn: &mut SqliteConnection,
    post_id: i64,
    user_id: i64,
    emoji: &str,
) -> RepoResult<Option<Reaction>> {
    let reaction = sqlx::query_as(&format!(
        "SELECT {REACTION_COLUMNS} FROM reaction r
         WHERE r.post_id = ?1 AND r.user_id = ?2 AND r.emoji = ?3"
    ))
    .bind(post_id)
    .bind(user_id)
    .bind(emoji)
    .fetch_optional(conn)
    .await?;
    Ok(reaction)
}

/// Insert unless the (post, user, emoji) triple exists. Returns whether a row was written.
pub async fn insert(conn: &mut SqliteConnection, reaction: &Reaction) -> RepoResult<bool> {
    let result = sqlx::query(
        "INSERT INTO reaction (id, emoji, post_id, user_id, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT (post_id, user_id, emoji) DO NOTHING",
    )
    .bind(reaction.id)
    .bind(&reaction.emoji)
    .bind(reaction.post_id)
    .bind(reaction.user_id)
    .bind(reaction.created_at)
    .execute(conn)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let result = sqlx::query("DELETE FROM reaction WHERE id = ?1")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(result.rows_affected() == 1)
}

/// Reactions of every post in scope, oldest first
pub async fn list_for_scope(pool: &SqlitePool, scope: PostScope) -> RepoResult<Vec<Reaction>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {REACTION_COLUMNS} FROM reaction r JOIN post p ON p.id = r.post_id"
    ));
    scope.push_filter(&mut qb);
    qb.push(" ORDER BY r.created_at ASC, r.id ASC");

    let rows = qb.build_query_as::<Reaction>().fetch_all(pool).await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::posts;
    use crate::db::test_support::pool_with_user;
    use shared::models::Post;

    #[tokio::test]
    async fn test_insert_ignores_duplicate_triple() {
        let (pool, org, user) = pool_with_user().await;
        let mut conn = pool.acquire().await.unwrap();
        let post = Post {
            id: 1,
            title: "t".into(),
            content: "c".into(),
            published: true,
            author_id: user.id,
            organization_id: org.id,
            created_at: 1,
            updated_at: 1,
        };
        posts::insert(&mut conn, &post).await.unwrap();

        let first = Reaction {
            id: 50,
            emoji: "👍".into(),
            post_id: 1,
            user_id: user.id,
            created_at: 2,
        };
        assert!(insert(&mut conn, &first).await.unwrap());
        let second = Reaction { id: 51, ..first.clone() };
        assert!(!insert(&mut conn, &second).await.unwrap());

        let found = find(&mut conn, 1, user.id, "👍").await.unwrap();
        assert_eq!(found, Some(first));
        assert!(find(&mut conn, 1, user.id, "❤️").await.unwrap().is_none());

        assert!(delete(&mut conn, 50).await.unwrap());
        assert!(!delete(&mut conn, 50).await.unwrap());
        drop(conn);

        let all = list_for_scope(&pool, PostScope::Feed { organization_id: org.id })
            .await
            .unwrap();
        assert!(all.is_empty());
    }
}
