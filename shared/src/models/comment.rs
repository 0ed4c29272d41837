//! Comment Model

use serde::{Deserialize, Serialize};

use super::user::UserSummary;

/// Comment entity (row in `comment`)
///
/// `parent_id` is set for replies. Only one level of nesting is rendered.
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub content: String,
    pub post_id: i64,
    pub author_id: i64,
    pub parent_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Comment {
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}

/// Comment with its author and direct replies
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    pub author: UserSummary,
    /// Direct replies, oldest first. Always empty for a reply.
    pub replies: Vec<CommentView>,
}

/// Add comment payload (`POST /api/posts/comments`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentCreate {
    pub post_id: Option<i64>,
    pub content: Option<String>,
    pub parent_id: Option<i64>,
}

/// Response of a successful comment creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentCreated {
    pub success: bool,
    pub comment: CommentView,
}
