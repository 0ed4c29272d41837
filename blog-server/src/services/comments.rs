//! Comment service

use shared::error::{AppError, ErrorCode};
use shared::models::{Comment, CommentCreate, CommentView};
use shared::util::{now_millis, snowflake_id};
use sqlx::SqlitePool;

use super::posts::comment_view;
use super::{OrgScope, with_text};
use crate::db::{comments, posts};
use crate::error::ServiceResult;

/// Add a comment, or a reply when `parent_id` is set
///
/// The post must belong to the caller's organization. A parent must be a
/// top-level comment of the same post.
pub async fn add_comment(
    pool: &SqlitePool,
    scope: OrgScope,
    author_id: i64,
    input: CommentCreate,
) -> ServiceResult<CommentView> {
    let content = with_text(input.content.as_deref());
    let (Some(post_id), Some(content)) = (input.post_id, content) else {
        let mut missing = Vec::new();
        if input.post_id.is_none() {
            missing.push("postId");
        }
        if content.is_none() {
            missing.push("content");
        }
        return Err(AppError::required(&missing).into());
    };

    if posts::find_in_org(pool, post_id, scope.organization_id)
        .await?
        .is_none()
    {
        return Err(AppError::new(ErrorCode::PostNotFound).into());
    }

    if let Some(parent_id) = input.parent_id {
        let Some(parent) = comments::find_by_id(pool, parent_id).await? else {
            return Err(AppError::new(ErrorCode::CommentNotFound).into());
        };
        if parent.post_id != post_id || parent.is_reply() {
            return Err(AppError::new(ErrorCode::InvalidParentComment)
                .with_detail("parentId", parent_id)
                .into());
        }
    }

    let now = now_millis();
    let comment = Comment {
        id: snowflake_id(),
        content: content.to_string(),
        post_id,
        author_id,
        parent_id: input.parent_id,
        created_at: now,
        updated_at: now,
    };
    comments::insert(pool, &comment).await?;

    tracing::info!(
        comment_id = comment.id,
        post_id,
        author_id,
        parent_id = ?comment.parent_id,
        "Comment added"
    );

    Ok(comment_view(comments::find_row(pool, comment.id).await?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_support::pool_with_user;
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

    fn comment(post_id: i64, content: &str, parent_id: Option<i64>) -> CommentCreate {
        CommentCreate {
            post_id: Some(post_id),
            content: Some(content.into()),
            parent_id,
        }
    }

    #[tokio::test]
    async fn test_reply_nests_one_level() {
        let (pool, scope, user_id, post_id) = setup().await;

        let top = add_comment(&pool, scope, user_id, comment(post_id, "first", None))
            .await
            .unwrap();
        assert!(top.replies.is_empty());
        assert_eq!(top.author.username, "alice");

        let reply = add_comment(
            &pool,
            scope,
            user_id,
            comment(post_id, "re: first", Some(top.comment.id)),
        )
        .await
        .unwrap();
        assert_eq!(reply.comment.parent_id, Some(top.comment.id));

        let view = get_post(&pool, scope, post_id).await.unwrap();
        assert_eq!(view.comments.len(), 1);
        assert_eq!(view.comments[0].comment.id, top.comment.id);
        assert_eq!(view.comments[0].replies.len(), 1);
        assert_eq!(view.comments[0].replies[0].comment.id, reply.comment.id);
        assert!(view.comments[0].replies[0].replies.is_empty());
    }

    #[tokio::test]
    async fn test_reply_to_reply_rejected() {
        let (pool, scope, user_id, post_id) = setup().await;
        let top = add_comment(&pool, scope, user_id, comment(post_id, "a", None))
            .await
            .unwrap();
        let reply = add_comment(&pool, scope, user_id, comment(post_id, "b", Some(top.comment.id)))
            .await
            .unwrap();

        let err = add_comment(&pool, scope, user_id, comment(post_id, "c", Some(reply.comment.id)))
            .await
            .unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::InvalidParentComment);

        let err = add_comment(&pool, scope, user_id, comment(post_id, "c", Some(42)))
            .await
            .unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::CommentNotFound);
    }

    #[tokio::test]
    async fn test_markdown_content_is_stored_verbatim() {
        let (pool, scope, user_id, post_id) = setup().await;
        let body = "    let x = 1;\n\n> quoted\n";

        let added = add_comment(&pool, scope, user_id, comment(post_id, body, None))
            .await
            .unwrap();
        assert_eq!(added.comment.content, body);

        let view = get_post(&pool, scope, post_id).await.unwrap();
        assert_eq!(view.comments[0].comment.content, body);

        let err = add_comment(&pool, scope, user_id, comment(post_id, " \n ", None))
            .await
            .unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::RequiredField);
    }

    #[tokio::test]
    async fn test_missing_fields_listed() {
        let (pool, scope, user_id, _) = setup().await;
        let err = AppError::from(
            add_comment(&pool, scope, user_id, CommentCreate::default())
                .await
                .unwrap_err(),
        );
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(
            err.details.unwrap()["fields"],
            serde_json::json!(["postId", "content"])
        );
    }

    #[tokio::test]
    async fn test_post_outside_organization() {
        let (pool, _, user_id, post_id) = setup().await;
        let err = add_comment(&pool, OrgScope::new(-1), user_id, comment(post_id, "x", None))
            .await
            .unwrap_err();
        assert_eq!(AppError::from(err).code, ErrorCode::PostNotFound);
    }
}
