//! PostgreSQL-backed [`CommentRepository`] implementation using Diesel.
//!
//! Inserts use `INSERT .. RETURNING` so the stored row, including the
//! database-assigned `id` and `created_at`, comes back in the same statement.
//! There is no window in which a successful insert is invisible to the
//! caller.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::debug;

use crate::domain::ports::{CommentRepository, CommentRepositoryError};
use crate::domain::{Comment, NewComment};

use super::models::{CommentRow, NewCommentRow};
use super::pool::{DbPool, PoolError};
use super::schema::comments;

/// Diesel-backed implementation of the [`CommentRepository`] port.
#[derive(Clone)]
pub struct DieselCommentRepository {
    pool: DbPool,
}

impl DieselCommentRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Map pool errors to comment repository errors.
fn map_pool_error(error: PoolError) -> CommentRepositoryError {
    match error {
        PoolError::Checkout { message } | PoolError::Build { message } => {
            CommentRepositoryError::connection(message)
        }
    }
}

/// Map Diesel errors to comment repository errors.
///
/// Detail goes to the log; clients only ever see the generic category.
fn map_diesel_error(error: diesel::result::Error) -> CommentRepositoryError {
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(
            error_type = %std::any::type_name_of_val(&error),
            "diesel operation failed"
        ),
    }

    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            CommentRepositoryError::connection("database connection error")
        }
        _ => CommentRepositoryError::query("database error"),
    }
}

#[async_trait]
impl CommentRepository for DieselCommentRepository {
    async fn list(&self, image_id: Option<&str>) -> Result<Vec<Comment>, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<CommentRow> = match image_id {
            Some(id) => {
                comments::table
                    .filter(comments::image_id.eq(id))
                    .order(comments::id.asc())
                    .select(CommentRow::as_select())
                    .load(&mut conn)
                    .await
            }
            None => {
                comments::table
                    .order((comments::created_at.desc(), comments::id.desc()))
                    .select(CommentRow::as_select())
                    .load(&mut conn)
                    .await
            }
        }
        .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Comment::from).collect())
    }

    async fn insert(&self, comment: &NewComment) -> Result<Comment, CommentRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewCommentRow {
            username: comment.username(),
            content: comment.content(),
            image_id: comment.image_id(),
        };

        let stored: CommentRow = diesel::insert_into(comments::table)
            .values(&new_row)
            .returning(CommentRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Comment::from(stored))
    }
}
