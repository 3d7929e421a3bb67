//! Comment use-cases: list and create.
//!
//! The service owns the repository port and the mapping from port failures
//! to the API error type. Input validation lives in [`NewComment`]; by the
//! time a draft reaches [`CommentsService::create`] it is already valid, so a
//! failed create never leaves a partially validated row behind.

use std::sync::Arc;

use tracing::error;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, Error, NewComment};

/// Application service exposing the comment operations.
#[derive(Clone)]
pub struct CommentsService {
    repository: Arc<dyn CommentRepository>,
}

impl CommentsService {
    /// Create a service backed by the given repository.
    pub fn new(repository: Arc<dyn CommentRepository>) -> Self {
        Self { repository }
    }

    /// List comments, optionally filtered by image identifier.
    ///
    /// An image with no comments yields an empty list, never an error.
    pub async fn list(&self, image_id: Option<&str>) -> Result<Vec<Comment>, Error> {
        self.repository
            .list(image_id)
            .await
            .map_err(map_repository_error)
    }

    /// Persist a validated comment and return the stored row.
    pub async fn create(&self, comment: NewComment) -> Result<Comment, Error> {
        self.repository
            .insert(&comment)
            .await
            .map_err(map_repository_error)
    }
}

/// Log the underlying cause and hand clients an opaque internal error.
fn map_repository_error(err: CommentRepositoryError) -> Error {
    error!(error = %err, "comment repository operation failed");
    Error::internal("Internal server error")
}
