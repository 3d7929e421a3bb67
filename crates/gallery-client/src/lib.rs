//! Sans-IO gallery browsing client.
//!
//! State machines for the image grid, the per-image comment thread, and the
//! display-name panel live here without any transport attached. The [`http`]
//! module provides reqwest-backed adapters for the [`ports`] the state
//! machines consume, so a host UI wires the two together and drives the rest
//! from its event loop.

pub mod auth;
pub mod comments;
pub mod gallery;
pub mod http;
pub mod image;
pub mod keywords;
pub mod ports;

pub use auth::{AuthPanel, DISPLAY_NAME_KEY, DisplayNameStore};
pub use comments::{CommentThread, SubmitOutcome};
pub use gallery::{Gallery, GalleryState, SCROLL_FETCH_MARGIN, ScrollMetrics};
pub use image::{CommentDraft, CommentRecord, GalleryImage};
pub use keywords::extract_keywords;
pub use ports::{CommentsApi, CommentsApiError, ImageSource, ImageSourceError};
