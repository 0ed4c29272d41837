//! Comment database operations

use shared::models::Comment;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::{PostScope, RepoError, RepoResult};

const COMMENT_COLUMNS: &str =
    "c.id, c.content, c.post_id, c.author_id, c.parent_id, c.created_at, c.updated_at";

/// Comment joined with its author's summary columns
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRow {
    #[sqlx(flatten)]
    pub comment: Comment,
    pub author_name: Option<String>,
    pub author_username: String,
}

pub async fn insert(pool: &SqlitePool, comment: &Comment) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO comment (id, content, post_id, author_id, parent_id, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )
    .bind(comment.id)
    .bind(&comment.content)
    .bind(comment.post_id)
    .bind(comment.author_id)
    .bind(comment.parent_id)
    .bind(comment.created_at)
    .bind(comment.updated_at)
    .execute(pool)
    .await?;
    Ok(())
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Comment>> {
    let comment = sqlx::query_as(&format!("SELECT {COMMENT_COLUMNS} FROM comment c WHERE c.id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(comment)
}

pub async fn find_row(pool: &SqlitePool, id: i64) -> RepoResult<CommentRow> {
    sqlx::query_as(&format!(
        "SELECT {COMMENT_COLUMNS}, u.name AS author_name, u.username AS author_username
         FROM comment c JOIN user u ON u.id = c.author_id
         WHERE c.id = ?1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| RepoError::NotFound(format!("Comment {id}")))
}

/// Every comment (top-level and replies) of the posts in scope, oldest first
pub async fn list_for_scope(pool: &SqlitePool, scope: PostScope) -> RepoResult<Vec<CommentRow>> {
    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {COMMENT_COLUMNS}, u.name AS author_name, u.username AS author_username
         FROM comment c
         JOIN user u ON u.id = c.author_id
         JOIN post p ON p.id = c.post_id"
    ));
    scope.push_filter(&mut qb);
    qb.push(" ORDER BY c.created_at ASC, c.id ASC");

    let rows = qb.build_query_as::<CommentRow>().fetch_all(pool).await?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::posts;
    use crate::db::test_support::pool_with_user;
    use shared::models::Post;

    #[tokio::test]
    async fn test_insert_and_list_with_parent() {
        let (pool, org, user) = pool_with_user().await;
        let post = Post {
            id: 10,
            title: "t".into(),
            content: "c".into(),
            published: true,
            author_id: user.id,
            organization_id: org.id,
            created_at: 1,
            updated_at: 1,
        };
        let mut conn = pool.acquire().await.unwrap();
        posts::insert(&mut conn, &post).await.unwrap();
        drop(conn);

        let top = Comment {
            id: 100,
            content: "first".into(),
            post_id: 10,
            author_id: user.id,
            parent_id: None,
            created_at: 5,
            updated_at: 5,
        };
        let reply = Comment {
            id: 101,
            content: "reply".into(),
            parent_id: Some(100),
            created_at: 6,
            updated_at: 6,
            ..top.clone()
        };
        insert(&pool, &reply).await.unwrap_err(); // parent does not exist yet
        insert(&pool, &top).await.unwrap();
        insert(&pool, &reply).await.unwrap();

        let rows = list_for_scope(&pool, PostScope::Feed { organization_id: org.id })
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].comment, top);
        assert_eq!(rows[1].comment.parent_id, Some(100));

        let row = find_row(&pool, 101).await.unwrap();
        assert_eq!(row.author_username, "alice");
        assert!(find_by_id(&pool, 999).await.unwrap().is_none());
    }
}
