//! Wire and display types shared across the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One image in the gallery grid.
///
/// Ephemeral display data: images are never persisted client-side, and the
/// like count is a local mirror of the provider's snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryImage {
    /// Provider-assigned identifier, also used to key comment threads.
    pub id: String,
    /// Photographer display name.
    pub author: String,
    /// Small rendition for the grid.
    pub thumb_url: String,
    /// Large rendition for the detail view.
    pub full_url: String,
    /// Alt text, when the provider has one.
    pub description: Option<String>,
    /// Like count at fetch time, incremented locally only.
    pub likes: u32,
}

/// A stored comment as returned by the comment service.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CommentRecord {
    pub id: i64,
    pub username: String,
    pub content: String,
    #[serde(default)]
    pub image_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A comment submission, serialised the way the service expects requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDraft {
    pub username: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
}
