//! Ports the client state machines consume.
//!
//! Adapters own transport details; the state machines only ever see these
//! traits and their error categories.

use async_trait::async_trait;

use crate::image::{CommentDraft, CommentRecord, GalleryImage};

/// Errors raised by image source adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageSourceError {
    /// The request never produced a usable response.
    #[error("image source transport failed: {message}")]
    Transport { message: String },
    /// The provider answered with a non-success status.
    #[error("image source returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not decode into the expected shape.
    #[error("image source payload invalid: {message}")]
    Decode { message: String },
}

impl ImageSourceError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a status error for the given HTTP status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Errors raised by comment service adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommentsApiError {
    /// The request never produced a usable response.
    #[error("comment service transport failed: {message}")]
    Transport { message: String },
    /// The service answered with a non-success status.
    #[error("comment service returned status {status}: {message}")]
    Status { status: u16, message: String },
    /// The response body did not decode into the expected shape.
    #[error("comment service payload invalid: {message}")]
    Decode { message: String },
}

impl CommentsApiError {
    /// Create a transport error with the given message.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a status error for the given HTTP status.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }

    /// Create a decode error with the given message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }
}

/// Source of gallery images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch a batch of random images.
    async fn fetch_random(&self, count: u32) -> Result<Vec<GalleryImage>, ImageSourceError>;
}

/// Client of the comment REST service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentsApi: Send + Sync {
    /// List the comments bound to one image.
    async fn list(&self, image_id: &str) -> Result<Vec<CommentRecord>, CommentsApiError>;

    /// Submit a comment and return the stored record.
    async fn create(&self, draft: CommentDraft) -> Result<CommentRecord, CommentsApiError>;
}
