//! Port for comment persistence.
//!
//! The [`CommentRepository`] trait defines the contract for storing and
//! listing comments. Adapters provide durable storage (PostgreSQL) or an
//! in-memory substitute for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::{Comment, NewComment};

use super::define_port_error;

define_port_error! {
    /// Errors raised by comment repository adapters.
    pub enum CommentRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "comment repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "comment repository query failed: {message}",
    }
}

/// Port for comment storage and retrieval.
///
/// # Ordering
///
/// - `list(Some(image_id))` returns matching comments in insertion order
///   (ascending id).
/// - `list(None)` returns every comment, newest first (`created_at`
///   descending).
///
/// An empty result is `Ok(vec![])`, never an error.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// List comments, optionally filtered by image identifier.
    async fn list(&self, image_id: Option<&str>) -> Result<Vec<Comment>, CommentRepositoryError>;

    /// Insert a validated comment and return the stored row, including the
    /// store-assigned `id` and `created_at`.
    ///
    /// The read-back must be atomic with the insert: callers never observe a
    /// state where the insert succeeded but the created comment is missing
    /// from the response.
    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError>;
}

/// In-memory [`CommentRepository`] used by unit and handler tests.
///
/// Assigns strictly increasing ids starting at 1 and stamps `created_at`
/// with the wall clock, mirroring the database adapter's observable
/// behaviour closely enough for contract tests.
#[derive(Debug, Default)]
pub struct InMemoryCommentRepository {
    state: Mutex<InMemoryState>,
}

#[derive(Debug, Default)]
struct InMemoryState {
    next_id: i64,
    rows: Vec<Comment>,
}

impl InMemoryCommentRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored comments. Test helper for "store unchanged" checks.
    pub fn len(&self) -> usize {
        self.state.lock().map(|state| state.rows.len()).unwrap_or(0)
    }

    /// Whether the repository holds no comments.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn list(&self, image_id: Option<&str>) -> Result<Vec<Comment>, CommentRepositoryError> {
        let state = self
            .state
            .lock()
            .map_err(|_| CommentRepositoryError::query("comment store poisoned"))?;

        let mut rows: Vec<Comment> = match image_id {
            Some(id) => state
                .rows
                .iter()
                .filter(|row| row.image_id.as_deref() == Some(id))
                .cloned()
                .collect(),
            None => state.rows.clone(),
        };

        if image_id.is_none() {
            // Newest first; id breaks ties from same-instant inserts.
            rows.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        }

        Ok(rows)
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut state = self
            .state
            .lock()
            .map_err(|_| CommentRepositoryError::query("comment store poisoned"))?;

        state.next_id += 1;
        let row = Comment {
            id: state.next_id,
            username: comment.username().to_owned(),
            content: comment.content().to_owned(),
            image_id: comment.image_id().map(str::to_owned),
            created_at: Utc::now(),
        };
        state.rows.push(row.clone());
        Ok(row)
    }
}

/// [`CommentRepository`] that fails every operation. Exercises 500 paths.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingCommentRepository;

#[async_trait]
impl CommentRepository for FailingCommentRepository {
    async fn list(&self, _image_id: Option<&str>) -> Result<Vec<Comment>, CommentRepositoryError> {
        Err(CommentRepositoryError::query("synthetic list failure"))
    }

    async fn insert(&self, _comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        Err(CommentRepositoryError::query("synthetic insert failure"))
    }
}
