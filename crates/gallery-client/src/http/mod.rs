//! Reqwest-backed adapters for the client ports.

pub mod comments_api;
pub mod image_source;

pub use comments_api::CommentsHttpApi;
pub use image_source::UnsplashHttpSource;

/// Compact a response body into a short single-line preview for error
/// messages.
fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_collapses_whitespace() {
        assert_eq!(body_preview(b"{\n  \"error\": \"x\"\n}"), "{ \"error\": \"x\" }");
    }

    #[test]
    fn preview_truncates_long_bodies() {
        let long = "a".repeat(400);
        let preview = body_preview(long.as_bytes());
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), 163);
    }
}
