//! Row types bridging Diesel and the domain entities.

use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::domain::Comment;

use super::schema::comments;

/// A comment row as read from the database.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = comments)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CommentRow {
    pub id: i64,
    pub username: String,
    pub content: String,
    pub image_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<CommentRow> for Comment {
    fn from(row: CommentRow) -> Self {
        Self {
            id: row.id,
            username: row.username,
            content: row.content,
            image_id: row.image_id,
            created_at: row.created_at,
        }
    }
}

/// Insertable comment draft. `id` and `created_at` come from the database.
#[derive(Debug, Insertable)]
#[diesel(table_name = comments)]
pub struct NewCommentRow<'a> {
    pub username: &'a str,
    pub content: &'a str,
    pub image_id: Option<&'a str>,
}
