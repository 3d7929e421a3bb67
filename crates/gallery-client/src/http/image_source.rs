//! Unsplash-backed image source adapter.
//!
//! Owns transport details only: the random-photos request, HTTP error
//! mapping, and JSON decoding into [`GalleryImage`] values.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use super::body_preview;
use crate::image::GalleryImage;
use crate::ports::{ImageSource, ImageSourceError};

/// Image source adapter performing GET requests against the Unsplash API.
pub struct UnsplashHttpSource {
    client: Client,
    endpoint: Url,
    access_key: String,
}

impl UnsplashHttpSource {
    /// Build an adapter with an explicit request timeout.
    ///
    /// `endpoint` is the API base, normally `https://api.unsplash.com/`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        access_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            access_key: access_key.into(),
        })
    }
}

#[async_trait]
impl ImageSource for UnsplashHttpSource {
    async fn fetch_random(&self, count: u32) -> Result<Vec<GalleryImage>, ImageSourceError> {
        let url = self
            .endpoint
            .join("photos/random")
            .map_err(|err| ImageSourceError::transport(format!("invalid endpoint: {err}")))?;

        let response = self
            .client
            .get(url)
            .query(&[("client_id", self.access_key.as_str())])
            .query(&[("count", count)])
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }

        parse_images(body.as_ref())
    }
}

#[derive(Debug, Deserialize)]
struct UnsplashPhotoDto {
    id: String,
    user: UnsplashUserDto,
    urls: UnsplashUrlsDto,
    alt_description: Option<String>,
    #[serde(default)]
    likes: u32,
}

#[derive(Debug, Deserialize)]
struct UnsplashUserDto {
    name: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrlsDto {
    thumb: String,
    regular: String,
}

impl From<UnsplashPhotoDto> for GalleryImage {
    fn from(dto: UnsplashPhotoDto) -> Self {
        Self {
            id: dto.id,
            author: dto.user.name,
            thumb_url: dto.urls.thumb,
            full_url: dto.urls.regular,
            description: dto.alt_description,
            likes: dto.likes,
        }
    }
}

fn parse_images(body: &[u8]) -> Result<Vec<GalleryImage>, ImageSourceError> {
    let decoded: Vec<UnsplashPhotoDto> = serde_json::from_slice(body)
        .map_err(|err| ImageSourceError::decode(format!("invalid photo payload: {err}")))?;
    Ok(decoded.into_iter().map(GalleryImage::from).collect())
}

fn map_transport_error(error: reqwest::Error) -> ImageSourceError {
    ImageSourceError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ImageSourceError {
    let preview = body_preview(body);
    let message = if preview.is_empty() {
        "no response body".to_owned()
    } else {
        preview
    };
    ImageSourceError::status(status.as_u16(), message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_photo_payload_into_gallery_images() {
        let body = r#"[
            {
                "id": "aZ3kXo9",
                "user": { "name": "Ansel" },
                "urls": {
                    "thumb": "https://img.example/aZ3kXo9/thumb",
                    "regular": "https://img.example/aZ3kXo9/regular"
                },
                "alt_description": "a long mountain ridge",
                "likes": 12
            },
            {
                "id": "bQ7mPv2",
                "user": { "name": "Dorothea" },
                "urls": {
                    "thumb": "https://img.example/bQ7mPv2/thumb",
                    "regular": "https://img.example/bQ7mPv2/regular"
                },
                "alt_description": null
            }
        ]"#;

        let images = parse_images(body.as_bytes()).expect("payload decodes");
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].author, "Ansel");
        assert_eq!(images[0].likes, 12);
        assert_eq!(images[1].description, None);
        assert_eq!(images[1].likes, 0, "missing like count defaults to zero");
    }

    #[test]
    fn malformed_payloads_map_to_decode_errors() {
        let error = parse_images(b"{\"errors\":[\"not an array\"]}").expect_err("must fail");
        assert!(matches!(error, ImageSourceError::Decode { .. }));
    }

    #[test]
    fn status_errors_carry_the_body_preview() {
        let error = map_status_error(
            StatusCode::FORBIDDEN,
            b"{\"errors\":[\"Rate Limit Exceeded\"]}",
        );
        match error {
            ImageSourceError::Status { status, message } => {
                assert_eq!(status, 403);
                assert!(message.contains("Rate Limit Exceeded"));
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
