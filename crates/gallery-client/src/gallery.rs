//! Gallery grid state machine and its controller.
//!
//! [`GalleryState`] is pure: it owns the image list, the detail-view
//! selection, and the fetch/error flags, and decides when a scroll position
//! warrants loading more. [`Gallery`] pairs that state with an
//! [`ImageSource`] and drives the async edges.

use std::sync::Arc;

use tracing::debug;

use crate::image::GalleryImage;
use crate::ports::{ImageSource, ImageSourceError};

/// Distance from the bottom of the content, in layout units, at which the
/// next batch is requested.
pub const SCROLL_FETCH_MARGIN: f64 = 100.0;

/// Scroll position snapshot supplied by the host UI.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollMetrics {
    /// Offset of the viewport top from the content top.
    pub scroll_top: f64,
    /// Visible height of the viewport.
    pub viewport_height: f64,
    /// Total height of the scrollable content.
    pub content_height: f64,
}

impl ScrollMetrics {
    fn near_bottom(&self) -> bool {
        self.scroll_top + self.viewport_height + SCROLL_FETCH_MARGIN >= self.content_height
    }
}

/// Pure state behind the gallery grid.
///
/// ## Invariants
/// - At most one fetch is in flight at a time.
/// - The selected image, when present, is a copy of an entry in `images`;
///   local like increments keep the two in step.
/// - A failed fetch keeps the images already shown.
#[derive(Debug, Default)]
pub struct GalleryState {
    images: Vec<GalleryImage>,
    selected: Option<GalleryImage>,
    fetch_in_flight: bool,
    error: Option<String>,
}

impl GalleryState {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Images currently in the grid.
    pub fn images(&self) -> &[GalleryImage] {
        &self.images
    }

    /// The image open in the detail view, if any.
    pub fn selected(&self) -> Option<&GalleryImage> {
        self.selected.as_ref()
    }

    /// The last fetch failure, if it has not been cleared.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Whether a fetch is currently outstanding.
    pub fn is_fetching(&self) -> bool {
        self.fetch_in_flight
    }

    /// Whether the given scroll position warrants fetching another batch.
    ///
    /// Never true while a fetch is outstanding or an uncleared error is
    /// present, so scroll events cannot stack requests or hammer a failing
    /// source.
    pub fn wants_fetch(&self, metrics: ScrollMetrics) -> bool {
        !self.fetch_in_flight && self.error.is_none() && metrics.near_bottom()
    }

    /// Claim the single fetch slot. Returns `false` when one is already
    /// outstanding.
    pub fn begin_fetch(&mut self) -> bool {
        if self.fetch_in_flight {
            return false;
        }
        self.fetch_in_flight = true;
        true
    }

    /// Append a fetched batch and release the fetch slot.
    pub fn complete_fetch(&mut self, batch: Vec<GalleryImage>) {
        debug!(count = batch.len(), "image batch appended");
        self.images.extend(batch);
        self.fetch_in_flight = false;
    }

    /// Record a fetch failure and release the fetch slot. Already-loaded
    /// images stay visible.
    pub fn fail_fetch(&mut self, error: &ImageSourceError) {
        self.error = Some(error.to_string());
        self.fetch_in_flight = false;
    }

    /// Clear the recorded error so fetching may resume.
    pub fn reset_error(&mut self) {
        self.error = None;
    }

    /// Open the detail view on the image with the given id.
    pub fn select(&mut self, image_id: &str) {
        self.selected = self.images.iter().find(|img| img.id == image_id).cloned();
    }

    /// Close the detail view.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Increment the like count of an image locally.
    ///
    /// Updates both the grid entry and the detail-view copy when they refer
    /// to the same image. Returns the new count, or `None` for an unknown id.
    pub fn like(&mut self, image_id: &str) -> Option<u32> {
        let image = self.images.iter_mut().find(|img| img.id == image_id)?;
        image.likes += 1;
        let likes = image.likes;

        if let Some(selected) = self.selected.as_mut()
            && selected.id == image_id
        {
            selected.likes = likes;
        }
        Some(likes)
    }
}

/// Gallery controller binding the state to an image source.
pub struct Gallery {
    state: GalleryState,
    source: Arc<dyn ImageSource>,
    page_size: u32,
}

impl Gallery {
    /// Create a gallery fetching `page_size` images per batch.
    pub fn new(source: Arc<dyn ImageSource>, page_size: u32) -> Self {
        Self {
            state: GalleryState::new(),
            source,
            page_size,
        }
    }

    /// Read access to the underlying state.
    pub fn state(&self) -> &GalleryState {
        &self.state
    }

    /// Mutable access for selection and like operations.
    pub fn state_mut(&mut self) -> &mut GalleryState {
        &mut self.state
    }

    /// Load the first batch.
    pub async fn load_initial(&mut self) {
        self.fetch_batch().await;
    }

    /// React to a scroll position change, fetching when near the bottom.
    pub async fn on_scroll(&mut self, metrics: ScrollMetrics) {
        if self.state.wants_fetch(metrics) {
            self.fetch_batch().await;
        }
    }

    async fn fetch_batch(&mut self) {
        if !self.state.begin_fetch() {
            return;
        }
        match self.source.fetch_random(self.page_size).await {
            Ok(batch) => self.state.complete_fetch(batch),
            Err(err) => self.state.fail_fetch(&err),
        }
    }
}
