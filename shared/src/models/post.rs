//! Post Model

use serde::{Deserialize, Serialize};

use super::comment::CommentView;
use super::reaction::Reaction;
use super::tag::Tag;
use super::user::UserSummary;

/// Post entity (row in `post`)
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub title: String,
    /// Markdown source
    pub content: String,
    pub published: bool,
    pub author_id: i64,
    pub organization_id: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Post with every relation the feed renders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostView {
    #[serde(flatten)]
    pub post: Post,
    pub author: UserSummary,
    pub tags: Vec<Tag>,
    /// Top-level comments, oldest first
    pub comments: Vec<CommentView>,
    pub reactions: Vec<Reaction>,
}

/// Create post payload (`POST /api/posts`)
///
/// `tags` stays untyped so a non-array value can be rejected with a
/// dedicated error instead of a generic parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostCreate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<serde_json::Value>,
}

/// `GET /api/posts`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostList {
    pub posts: Vec<PostView>,
}

/// `POST /api/posts`, `GET /api/posts/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostEnvelope {
    pub post: PostView,
}
