//! Business logic
//!
//! Every service call takes an [`OrgScope`]: reads and writes never leave the
//! caller's organization.

pub mod comments;
pub mod posts;
pub mod reactions;

pub use comments::add_comment;
pub use posts::{create_post, get_post, list_posts};
pub use reactions::toggle_reaction;

use shared::models::UserSummary;

use crate::db::PostScope;

/// The organization a request acts in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrgScope {
    pub organization_id: i64,
}

impl OrgScope {
    pub fn new(organization_id: i64) -> Self {
        Self { organization_id }
    }

    /// Published posts of the organization
    pub(crate) fn feed(&self) -> PostScope {
        PostScope::Feed {
            organization_id: self.organization_id,
        }
    }

    /// One post of the organization
    pub(crate) fn post(&self, post_id: i64) -> PostScope {
        PostScope::Single {
            organization_id: self.organization_id,
            post_id,
        }
    }
}

pub(crate) fn author_summary(id: i64, name: Option<String>, username: String) -> UserSummary {
    UserSummary { id, name, username }
}

/// Trimmed, non-empty text or `None`
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Text with at least one non-whitespace character, left as written
///
/// Markdown bodies keep their leading indentation and trailing newlines.
pub(crate) fn with_text(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
