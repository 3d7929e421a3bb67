//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend only
//! on the domain service and remain testable without a database.

use std::sync::Arc;

use crate::domain::ports::CommentRepository;
use crate::domain::CommentsService;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub comments: CommentsService,
}

impl HttpState {
    /// Construct state over the given repository implementation.
    pub fn new(repository: Arc<dyn CommentRepository>) -> Self {
        Self {
            comments: CommentsService::new(repository),
        }
    }
}
