//! Comment entity and its validation boundary.
//!
//! A [`NewComment`] can only be constructed through [`NewComment::try_new`],
//! so every draft that reaches the service or a repository is already valid.
//! [`Comment`] is the stored shape returned to API clients.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Minimum accepted comment length, counted in Unicode scalar values.
pub const CONTENT_MIN: usize = 5;

/// Why a comment draft was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CommentValidationError {
    /// Username is missing or whitespace only.
    #[error("username must not be empty")]
    EmptyUsername,
    /// Content is missing or whitespace only.
    #[error("content must not be empty")]
    EmptyContent,
    /// Content is shorter than the minimum length.
    #[error("content must be at least {min} characters long")]
    ContentTooShort { min: usize },
}

/// A stored comment as returned to API clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub struct Comment {
    /// Store-assigned identifier, strictly increasing per insert.
    #[schema(example = 42)]
    pub id: i64,
    /// Display name supplied by the author.
    #[schema(example = "ada")]
    pub username: String,
    /// Comment body.
    #[schema(example = "what a view")]
    pub content: String,
    /// Identifier of the image the comment belongs to, if any.
    #[schema(example = "aZ3kXo9")]
    pub image_id: Option<String>,
    /// Store-assigned creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// A validated comment draft awaiting persistence.
///
/// Fields are private: the only way in is [`NewComment::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    username: String,
    content: String,
    image_id: Option<String>,
}

impl NewComment {
    /// Validate and construct a draft.
    ///
    /// Rejects empty usernames, empty content, and content shorter than
    /// [`CONTENT_MIN`] characters. Length is measured in Unicode scalar
    /// values, not bytes, so multi-byte text is not penalised.
    pub fn try_new(
        username: impl Into<String>,
        content: impl Into<String>,
        image_id: Option<String>,
    ) -> Result<Self, CommentValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(CommentValidationError::EmptyUsername);
        }

        let content = content.into();
        if content.trim().is_empty() {
            return Err(CommentValidationError::EmptyContent);
        }
        if content.chars().count() < CONTENT_MIN {
            return Err(CommentValidationError::ContentTooShort { min: CONTENT_MIN });
        }

        Ok(Self {
            username,
            content,
            image_id,
        })
    }

    /// Author display name.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Comment body.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Target image identifier, if the comment is bound to one.
    pub fn image_id(&self) -> Option<&str> {
        self.image_id.as_deref()
    }
}
