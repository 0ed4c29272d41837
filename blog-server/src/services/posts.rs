//! Post service
//!
//! A post view is assembled from one query per relation (posts with authors,
//! tags, comments with authors, reactions) over the same [`PostScope`].

use std::collections::HashMap;

use serde_json::Value;
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{CommentView, Post, PostCreate, PostView, Reaction, Tag};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::{OrgScope, author_summary, non_blank, with_text};
use crate::db::comments::CommentRow;
use crate::db::{PostScope, comments, posts, reactions, tags};
use crate::error::ServiceResult;

/// Published posts of the organization, newest first
pub async fn list_posts(pool: &SqlitePool, scope: OrgScope) -> ServiceResult<Vec<PostView>> {
    load_views(pool, scope.feed()).await
}

/// One post of the organization (published or not); `PostNotFound` otherwise
pub async fn get_post(pool: &SqlitePool, scope: OrgScope, post_id: i64) -> ServiceResult<PostView> {
    load_views(pool, scope.post(post_id))
        .await?
        .pop()
        .ok_or_else(|| AppError::new(ErrorCode::PostNotFound).into())
}

/// Create and publish a post authored by `author_id`
pub async fn create_post(
    pool: &SqlitePool,
    scope: OrgScope,
    author_id: i64,
    input: PostCreate,
) -> ServiceResult<PostView> {
    let (Some(title), Some(content)) = (
        non_blank(input.title.as_deref()),
        with_text(input.content.as_deref()),
    ) else {
        return Err(AppError::new(ErrorCode::PostTitleOrContentMissing).into());
    };
    let tag_names = parse_tags(input.tags.as_ref())?;

    let now = now_millis();
    let post = Post {
        id: snowflake_id(),
        title: title.to_string(),
        content: content.to_string(),
        published: true,
        author_id,
        organization_id: scope.organization_id,
        created_at: now,
        updated_at: now,
    };

    let mut tx = pool.begin().await?;
    posts::insert(&mut *tx, &post).await?;
    for name in &tag_names {
        tags::insert_for_post(&mut *tx, post.id, name).await?;
    }
    tx.commit().await?;

    tracing::info!(
        post_id = post.id,
        author_id,
        organization_id = scope.organization_id,
        tags = tag_names.len(),
        "Post created"
    );

    get_post(pool, scope, post.id).await
}

/// `null`/absent → no tags; otherwise every element must be a string
fn parse_tags(value: Option<&Value>) -> AppResult<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(name) => Ok(name.trim().to_string()),
                _ => Err(AppError::new(ErrorCode::TagsNotArray)),
            })
            .filter(|name| !matches!(name, Ok(n) if n.is_empty()))
            .collect(),
        Some(_) => Err(AppError::new(ErrorCode::TagsNotArray)),
    }
}

async fn load_views(pool: &SqlitePool, scope: PostScope) -> ServiceResult<Vec<PostView>> {
    let rows = posts::list_rows(pool, scope).await?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut tags_by_post: HashMap<i64, Vec<Tag>> = HashMap::new();
    for row in tags::list_for_scope(pool, scope).await? {
        tags_by_post.entry(row.post_id).or_default().push(row.tag);
    }

    let mut reactions_by_post: HashMap<i64, Vec<Reaction>> = HashMap::new();
    for reaction in reactions::list_for_scope(pool, scope).await? {
        reactions_by_post
            .entry(reaction.post_id)
            .or_default()
            .push(reaction);
    }

    let mut comments_by_post = comment_trees(comments::list_for_scope(pool, scope).await?);

    Ok(rows
        .into_iter()
        .map(|row| {
            let id = row.post.id;
            PostView {
                author: author_summary(row.post.author_id, row.author_name, row.author_username),
                post: row.post,
                tags: tags_by_post.remove(&id).unwrap_or_default(),
                comments: comments_by_post.remove(&id).unwrap_or_default(),
                reactions: reactions_by_post.remove(&id).unwrap_or_default(),
            }
        })
        .collect())
}

/// Group comments per post as top-level comments with their direct replies.
///
/// Input is oldest-first, so both levels keep that order. Replies to replies
/// have no place in a one-level tree and are left out.
pub(crate) fn comment_trees(rows: Vec<CommentRow>) -> HashMap<i64, Vec<CommentView>> {
    let (top_level, replies): (Vec<_>, Vec<_>) =
        rows.into_iter().partition(|row| !row.comment.is_reply());

    let mut replies_by_parent: HashMap<i64, Vec<CommentView>> = HashMap::new();
    for row in replies {
        if let Some(parent_id) = row.comment.parent_id {
            replies_by_parent
                .entry(parent_id)
                .or_default()
                .push(comment_view(row));
        }
    }

    let mut by_post: HashMap<i64, Vec<CommentView>> = HashMap::new();
    for row in top_level {
        let mut view = comment_view(row);
        view.replies = replies_by_parent
            .remove(&view.comment.id)
            .unwrap_or_default();
        by_post.entry(view.comment.post_id).or_default().push(view);
    }
    by_post
}

pub(crate) fn comment_view(row: CommentRow) -> CommentView {
    CommentView {
        author: author_summary(row.comment.author_id, row.author_name, row.author_username),
        comment: row.comment,
        replies: Vec::new(),
    }
}
