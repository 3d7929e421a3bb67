//! Comment service adapter over HTTP.
//!
//! Mirrors the service's wire contract: `imageId` travels camelCase in
//! queries and request bodies, responses come back snake_case. A non-array
//! listing body is treated as an empty thread rather than an error, so a
//! misbehaving proxy cannot wedge the UI.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::Value;

use super::body_preview;
use crate::image::{CommentDraft, CommentRecord};
use crate::ports::{CommentsApi, CommentsApiError};

/// HTTP client for the comment REST service.
pub struct CommentsHttpApi {
    client: Client,
    base_url: Url,
}

impl CommentsHttpApi {
    /// Build an adapter against the service base URL with an explicit
    /// request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn comments_url(&self) -> Result<Url, CommentsApiError> {
        self.base_url
            .join("comments")
            .map_err(|err| CommentsApiError::transport(format!("invalid base URL: {err}")))
    }
}

#[async_trait]
impl CommentsApi for CommentsHttpApi {
    async fn list(&self, image_id: &str) -> Result<Vec<CommentRecord>, CommentsApiError> {
        let response = self
            .client
            .get(self.comments_url()?)
            .query(&[("imageId", image_id)])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_comment_list(body.as_ref())
    }

    async fn create(&self, draft: CommentDraft) -> Result<CommentRecord, CommentsApiError> {
        let response = self
            .client
            .post(self.comments_url()?)
            .json(&draft)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        serde_json::from_slice(body.as_ref())
            .map_err(|err| CommentsApiError::decode(format!("invalid comment payload: {err}")))
    }
}

/// Decode a listing body, accepting only a JSON array of records.
///
/// Anything else decodes to an empty list.
fn parse_comment_list(body: &[u8]) -> Result<Vec<CommentRecord>, CommentsApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|err| CommentsApiError::decode(format!("invalid listing payload: {err}")))?;

    match value {
        Value::Array(_) => serde_json::from_value(value)
            .map_err(|err| CommentsApiError::decode(format!("invalid comment record: {err}"))),
        _ => Ok(Vec::new()),
    }
}

fn map_transport_error(error: reqwest::Error) -> CommentsApiError {
    CommentsApiError::transport(error.to_string())
}

/// Map a non-success status, preferring the service's own `message` field
/// over a raw body preview.
fn map_status_error(status: StatusCode, body: &[u8]) -> CommentsApiError {
    let message = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body_preview(body));
    CommentsApiError::status(status.as_u16(), message)
}
