//! Per-image comment thread state machine.
//!
//! A thread binds to one image id, loads its comments on bind, and refetches
//! after every accepted submission so the list always reflects the store.

use std::sync::Arc;

use tracing::debug;

use crate::image::{CommentDraft, CommentRecord};
use crate::ports::CommentsApi;

/// Result of a submission attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The comment was stored and the thread refreshed.
    Accepted,
    /// Username or content was blank; nothing was sent.
    MissingFields,
    /// A previous submission is still outstanding; this one was dropped.
    AlreadySubmitting,
    /// The service rejected or failed the submission.
    Failed,
}

/// Comment thread bound to one image.
///
/// ## Invariants
/// - At most one submission is in flight at a time.
/// - After a failed refresh the list is empty and `error` is set; stale
///   comments from another image are never shown.
pub struct CommentThread {
    api: Arc<dyn CommentsApi>,
    image_id: String,
    comments: Vec<CommentRecord>,
    loading: bool,
    error: Option<String>,
    submit_in_flight: bool,
}

impl CommentThread {
    /// Bind a thread to an image and load its comments.
    pub async fn open(api: Arc<dyn CommentsApi>, image_id: impl Into<String>) -> Self {
        let mut thread = Self {
            api,
            image_id: image_id.into(),
            comments: Vec::new(),
            loading: false,
            error: None,
            submit_in_flight: false,
        };
        thread.refresh().await;
        thread
    }

    /// The image this thread is bound to.
    pub fn image_id(&self) -> &str {
        &self.image_id
    }

    /// Comments currently shown, oldest first.
    pub fn comments(&self) -> &[CommentRecord] {
        &self.comments
    }

    /// Whether a refresh is outstanding.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Whether a submission is outstanding.
    pub fn is_submitting(&self) -> bool {
        self.submit_in_flight
    }

    /// The last fetch or submit failure, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Rebind the thread to a different image and reload.
    pub async fn rebind(&mut self, image_id: impl Into<String>) {
        self.image_id = image_id.into();
        self.comments.clear();
        self.error = None;
        self.refresh().await;
    }

    /// Reload the comment list from the service.
    pub async fn refresh(&mut self) {
        self.loading = true;
        match self.api.list(&self.image_id).await {
            Ok(comments) => {
                debug!(image_id = %self.image_id, count = comments.len(), "thread refreshed");
                self.comments = comments;
                self.error = None;
            }
            Err(err) => {
                self.comments.clear();
                self.error = Some(err.to_string());
            }
        }
        self.loading = false;
    }

    /// Submit a comment under the given display name.
    ///
    /// Blank fields are rejected locally; the service still enforces the
    /// content length rule and its rejection surfaces as [`SubmitOutcome::Failed`].
    pub async fn submit(&mut self, username: &str, content: &str) -> SubmitOutcome {
        if self.submit_in_flight {
            return SubmitOutcome::AlreadySubmitting;
        }
        if username.trim().is_empty() || content.trim().is_empty() {
            return SubmitOutcome::MissingFields;
        }

        self.submit_in_flight = true;
        let draft = CommentDraft {
            username: username.to_owned(),
            content: content.to_owned(),
            image_id: Some(self.image_id.clone()),
        };

        let outcome = match self.api.create(draft).await {
            Ok(_) => {
                self.refresh().await;
                SubmitOutcome::Accepted
            }
            Err(err) => {
                self.error = Some(err.to_string());
                SubmitOutcome::Failed
            }
        };
        self.submit_in_flight = false;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use rstest::rstest;

    use crate::ports::{CommentsApiError, MockCommentsApi};

    fn record(id: i64, image_id: &str, content: &str) -> CommentRecord {
        CommentRecord {
            id,
            username: "ada".to_owned(),
            content: content.to_owned(),
            image_id: Some(image_id.to_owned()),
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn opening_a_thread_loads_its_comments() {
        let mut api = MockCommentsApi::new();
        api.expect_list()
            .withf(|image_id| image_id == "img-1")
            .times(1)
            .returning(|_| Ok(vec![record(1, "img-1", "what a view")]));

        let thread = CommentThread::open(Arc::new(api), "img-1").await;

        assert_eq!(thread.comments().len(), 1);
        assert!(thread.error().is_none());
        assert!(!thread.is_loading());
    }

    #[tokio::test]
    async fn failed_refresh_clears_the_list_and_records_the_error() {
        let mut api = MockCommentsApi::new();
        api.expect_list()
            .times(1)
            .returning(|_| Err(CommentsApiError::transport("connection reset")));

        let thread = CommentThread::open(Arc::new(api), "img-1").await;

        assert!(thread.comments().is_empty());
        assert!(thread.error().is_some());
    }

    #[tokio::test]
    async fn rebinding_switches_image_and_reloads() {
        let mut api = MockCommentsApi::new();
        api.expect_list()
            .withf(|image_id| image_id == "img-1")
            .times(1)
            .returning(|_| Ok(vec![record(1, "img-1", "about the first")]));
        api.expect_list()
            .withf(|image_id| image_id == "img-2")
            .times(1)
            .returning(|_| Ok(vec![record(2, "img-2", "about the second")]));

        let mut thread = CommentThread::open(Arc::new(api), "img-1").await;
        thread.rebind("img-2").await;

        assert_eq!(thread.image_id(), "img-2");
        assert_eq!(thread.comments().len(), 1);
        assert_eq!(thread.comments()[0].image_id.as_deref(), Some("img-2"));
    }

    #[tokio::test]
    async fn accepted_submission_refetches_the_thread() {
        let mut api = MockCommentsApi::new();
        api.expect_list().times(1).returning(|_| Ok(vec![]));
        api.expect_create()
            .withf(|draft| {
                draft.username == "ada"
                    && draft.content == "what a view"
                    && draft.image_id.as_deref() == Some("img-1")
            })
            .times(1)
            .returning(|_| Ok(record(1, "img-1", "what a view")));
        // The refetch after acceptance shows the stored row.
        api.expect_list()
            .times(1)
            .returning(|_| Ok(vec![record(1, "img-1", "what a view")]));

        let mut thread = CommentThread::open(Arc::new(api), "img-1").await;
        let outcome = thread.submit("ada", "what a view").await;

        assert_eq!(outcome, SubmitOutcome::Accepted);
        assert_eq!(thread.comments().len(), 1);
        assert!(!thread.is_submitting());
    }

    #[rstest]
    #[case("", "what a view")]
    #[case("   ", "what a view")]
    #[case("ada", "")]
    #[case("ada", " \t ")]
    #[tokio::test]
    async fn blank_fields_never_reach_the_service(
        #[case] username: &str,
        #[case] content: &str,
    ) {
        let mut api = MockCommentsApi::new();
        api.expect_list().times(1).returning(|_| Ok(vec![]));
        // No expect_create: a call would fail the test.

        let mut thread = CommentThread::open(Arc::new(api), "img-1").await;
        let outcome = thread.submit(username, content).await;

        assert_eq!(outcome, SubmitOutcome::MissingFields);
    }

    #[tokio::test]
    async fn rejected_submission_reports_failure_with_the_service_message() {
        let mut api = MockCommentsApi::new();
        api.expect_list().times(1).returning(|_| Ok(vec![]));
        api.expect_create().times(1).returning(|_| {
            Err(CommentsApiError::status(
                400,
                "content must be at least 5 characters long",
            ))
        });

        let mut thread = CommentThread::open(Arc::new(api), "img-1").await;
        let outcome = thread.submit("ada", "hey").await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        let error = thread.error().expect("error recorded");
        assert!(error.contains("at least 5 characters"));
        assert!(!thread.is_submitting(), "guard releases after failure");
    }
}
