//! Unified error codes for the blog
//!
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 3xxx: Organization errors
//! - 4xxx: Post errors
//! - 5xxx: Comment errors
//! - 6xxx: Reaction errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values so the browser client can
/// switch on them without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Malformed body or path parameter
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 3xxx: Organization ====================
    /// Session carries no organization
    OrganizationNotFound = 3001,

    // ==================== 4xxx: Post ====================
    /// Post not found in the caller's organization
    PostNotFound = 4001,
    /// Title or content missing
    PostTitleOrContentMissing = 4002,
    /// Tags payload is not an array of strings
    TagsNotArray = 4003,

    // ==================== 5xxx: Comment ====================
    /// Parent comment not found
    CommentNotFound = 5001,
    /// Parent comment is not a top-level comment of the same post
    InvalidParentComment = 5002,

    // ==================== 6xxx: Reaction ====================
    /// Emoji empty or too long
    InvalidEmoji = 6001,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
}

impl ErrorCode {
    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Get the developer-facing English message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Missing required fields",

            // Auth
            ErrorCode::NotAuthenticated => "Unauthorized",
            ErrorCode::InvalidCredentials => "Invalid email or password",
            ErrorCode::TokenExpired => "Session has expired",
            ErrorCode::TokenInvalid => "Invalid session",

            // Organization
            ErrorCode::OrganizationNotFound => "Organization not found",

            // Post
            ErrorCode::PostNotFound => "Post not found",
            ErrorCode::PostTitleOrContentMissing => "Title and content are required",
            ErrorCode::TagsNotArray => "Tags must be an array",

            // Comment
            ErrorCode::CommentNotFound => "Comment not found",
            ErrorCode::InvalidParentComment => {
                "Parent must be a top-level comment on the same post"
            }

            // Reaction
            ErrorCode::InvalidEmoji => "Emoji must be 1 to 32 characters",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Organization
            3001 => Ok(ErrorCode::OrganizationNotFound),

            // Post
            4001 => Ok(ErrorCode::PostNotFound),
            4002 => Ok(ErrorCode::PostTitleOrContentMissing),
            4003 => Ok(ErrorCode::TagsNotArray),

            // Comment
            5001 => Ok(ErrorCode::CommentNotFound),
            5002 => Ok(ErrorCode::InvalidParentComment),

            // Reaction
            6001 => Ok(ErrorCode::InvalidEmoji),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
