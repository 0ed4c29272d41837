//! Tag database operations
//!
//! Tags are never looked up by name: each call to [`insert_for_post`] creates
//! a fresh row even when the same name already exists.

use shared::models::Tag;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};

use super::{PostScope, RepoResult};

/// Tag with the post it is attached to
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PostTagRow {
    pub post_id: i64,
    #[sqlx(flatten)]
    pub tag: Tag,
}

pub async fn insert_for_post(
    conn: &mut SqliteConnection,
    post_id: i64,
    name: &str,
) -> RepoResult<Tag> {
    let tag = Tag {
        id: shared::util::snowflake_id(),
        name: name.to_string(),
    };
    sqlx::query("INSERT INTO tag (id, name) VALUES (?1, ?2)")
        .bind(tag.id)
        .bind(&tag.name)
        .execute(&mut *conn)
        .await?;
    sqlx::query("INSERT INTO post_tag (post_id, tag_id) VALUES (?1, ?2)")
        .bind(post_id)
        .bind(tag.id)
        .execute(&mut *conn)
        .await?;
    Ok(tag)
}

/// Tags of every post in scope
pub async fn list_for_scope(pool: &SqlitePool, scope: PostScope) -> RepoResult<Vec<PostTagRow>> {
    let mut qb = QueryBuilder::<Sqlite>::new(
        "SELECT pt.post_id, t.id, t.name
         FROM post_tag pt
         JOIN tag t ON t.id = pt.tag_id
         JOIN post p ON p.id = pt.post_id",
    );
    scope.push_filter(&mut qb);
    qb.push(" ORDER BY pt.rowid");

    let rows = qb.build_query_as::<PostTagRow>().fetch_all(pool).await?;
    Ok(rows)
}
