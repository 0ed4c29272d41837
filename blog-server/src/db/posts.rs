//! Post database operations

use shared::models::Post;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use super::{PostScope, RepoResult};

/// Post joined with its author's summary columns
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostRow {
    #[sqlx(flatten)]
    pub post: Post,
    pub author_name: Option<String>,
    pub author_username: String,
}

pub async fn insert(conn: &mut SqliteConnection, post: &Post) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO post (id, title, content, published, author_id, organization_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(post.id)
    .bind(&post.title)
    .bind(&post.content)
    .bind(post.published)
    .bind(post.author_id)
    .bind(post.organization_id)
    .bind(post.created_at)
    .bind(post.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Find a post only if it belongs to the organization
pub async fn find_in_org(
    pool: &SqlitePool,
    id: i64,
    organization_id: i64,
) -> RepoResult<Option<Post>> {
    let post = sqlx::query_as(
        "SELECT id, title, content, published, author_id, organization_id, created_at, updated_at
         FROM post WHERE id = ?1 AND organization_id = ?2",
    )
    .bind(id)
    .bind(organization_id)
    .fetch_optional(pool)
    .await?;
    Ok(post)
}

/// Posts in scope with author columns, newest first
pub async fn list_rows(pool: &SqlitePool, scope: PostScope) -> RepoResult<Vec<PostRow>> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT p.id, p.title, p.content, p.published, p.author_id, p.organization_id,
                p.created_at, p.updated_at, u.name AS author_name, u.username AS author_username
         FROM post p JOIN user u ON u.id = p.author_id",
    );
    scope.push_filter(&mut qb);
    qb.push(" ORDER BY p.created_at DESC, p.id DESC");

    let rows = qb.build_query_as::<PostRow>().fetch_all(pool).await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::pool_with_user;

    fn post(id: i64, org: i64, author: i64, published: bool, created_at: i64) -> Post {
        Post {
            id,
            title: format!("Post {id}"),
            content: "# Hello".to_string(),
            published,
            author_id: author,
            organization_id: org,
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn test_feed_is_newest_first_and_published_only() {
        let (pool, org, user) = pool_with_user().await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, &post(1, org.id, user.id, true, 100)).await.unwrap();
        insert(&mut conn, &post(2, org.id, user.id, true, 300)).await.unwrap();
        insert(&mut conn, &post(3, org.id, user.id, false, 200)).await.unwrap();
        drop(conn);

        let rows = list_rows(&pool, PostScope::Feed { organization_id: org.id })
            .await
            .unwrap();
        let ids: Vec<i64> = rows.iter().map(|r| r.post.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(rows[0].author_username, "alice");
        assert_eq!(rows[0].author_name.as_deref(), Some("Alice"));
    }

    #[tokio::test]
    async fn test_single_scope_respects_organization() {
        let (pool, org, user) = pool_with_user().await;
        let mut conn = pool.acquire().await.unwrap();
        insert(&mut conn, &post(9, org.id, user.id, false, 100)).await.unwrap();
        drop(conn);

        let own = list_rows(
            &pool,
            PostScope::Single {
                organization_id: org.id,
                post_id: 9,
            },
        )
        .await
        .unwrap();
        assert_eq!(own.len(), 1);

        let other = list_rows(
            &pool,
            PostScope::Single {
                organization_id: org.id + 1,
                post_id: 9,
            },
        )
        .await
        .unwrap();
        assert!(other.is_empty());
        assert!(find_in_org(&pool, 9, org.id + 1).await.unwrap().is_none());
        assert!(find_in_org(&pool, 9, org.id).await.unwrap().is_some());
    }
}
