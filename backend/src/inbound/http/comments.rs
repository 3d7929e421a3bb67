//! Comments API handlers.
//!
//! ```text
//! GET /comments?imageId=aZ3kXo9
//! POST /comments {"username":"ada","content":"what a view","imageId":"aZ3kXo9"}
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::{Comment, CommentValidationError, Error, NewComment};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Query parameters for `GET /comments`.
///
/// An absent, empty, or whitespace-only `imageId` lists every comment.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ListCommentsQuery {
    /// Restrict the listing to one image.
    pub image_id: Option<String>,
}

impl ListCommentsQuery {
    /// Effective filter after normalising blank values to "no filter".
    fn filter(&self) -> Option<&str> {
        self.image_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Request body for `POST /comments`.
///
/// Example JSON:
/// `{"username":"ada","content":"what a view","imageId":"aZ3kXo9"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub username: String,
    pub content: String,
    #[serde(default)]
    pub image_id: Option<String>,
}

impl TryFrom<CreateCommentRequest> for NewComment {
    type Error = CommentValidationError;

    fn try_from(value: CreateCommentRequest) -> Result<Self, Self::Error> {
        Self::try_new(value.username, value.content, value.image_id)
    }
}

/// List comments, newest first, or in insertion order when filtered by image.
#[utoipa::path(
    get,
    path = "/comments",
    params(ListCommentsQuery),
    responses(
        (status = 200, description = "Comments", body = [Comment]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "listComments"
)]
#[get("/comments")]
pub async fn list_comments(
    state: web::Data<HttpState>,
    query: web::Query<ListCommentsQuery>,
) -> ApiResult<web::Json<Vec<Comment>>> {
    let comments = state.comments.list(query.filter()).await?;
    Ok(web::Json(comments))
}

/// Store a comment and return the created row.
///
/// Validation happens before the store is touched, so a rejected request
/// never changes the comment list.
#[utoipa::path(
    post,
    path = "/comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = Comment),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["comments"],
    operation_id = "createComment"
)]
#[post("/comments")]
pub async fn create_comment(
    state: web::Data<HttpState>,
    payload: web::Json<CreateCommentRequest>,
) -> ApiResult<HttpResponse> {
    let draft = NewComment::try_from(payload.into_inner()).map_err(map_validation_error)?;
    let created = state.comments.create(draft).await?;
    Ok(HttpResponse::Created().json(created))
}

fn map_validation_error(err: CommentValidationError) -> Error {
    match err {
        CommentValidationError::EmptyUsername => Error::invalid_request("Missing data")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        CommentValidationError::EmptyContent => Error::invalid_request("Missing data")
            .with_details(json!({ "field": "content", "code": "empty_content" })),
        CommentValidationError::ContentTooShort { min } => {
            Error::invalid_request(format!("content must be at least {min} characters long"))
                .with_details(json!({ "field": "content", "code": "content_too_short" }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::domain::ports::{
        CommentRepository, FailingCommentRepository, InMemoryCommentRepository,
    };

    fn test_app(
        repository: Arc<dyn CommentRepository>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .app_data(crate::inbound::http::json_error_config())
            .app_data(web::Data::new(HttpState::new(repository)))
            .service(list_comments)
            .service(create_comment)
    }

    fn request_body(username: &str, content: &str, image_id: Option<&str>) -> CreateCommentRequest {
        CreateCommentRequest {
            username: username.into(),
            content: content.into(),
            image_id: image_id.map(str::to_owned),
        }
    }

    async fn post_comment<S, B>(
        app: &S,
        body: &CreateCommentRequest,
    ) -> actix_web::dev::ServiceResponse<B>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
        B: actix_web::body::MessageBody,
    {
        let request = actix_test::TestRequest::post()
            .uri("/comments")
            .set_json(body)
            .to_request();
        actix_test::call_service(app, request).await
    }

    async fn list_as_json<S, B>(app: &S, uri: &str) -> Vec<Value>
    where
        S: actix_web::dev::Service<
                actix_http::Request,
                Response = actix_web::dev::ServiceResponse<B>,
                Error = actix_web::Error,
            >,
        B: actix_web::body::MessageBody,
    {
        let response =
            actix_test::call_service(app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert!(response.status().is_success());
        let body = actix_test::read_body(response).await;
        let value: Value = serde_json::from_slice(&body).expect("response JSON");
        value.as_array().expect("array body").clone()
    }

    #[actix_web::test]
    async fn created_comment_is_listed_for_its_image() {
        let app = actix_test::init_service(test_app(Arc::new(InMemoryCommentRepository::new())))
            .await;

        let response = post_comment(&app, &request_body("ada", "what a view", Some("img-1"))).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::CREATED);
        let created: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("created row");
        assert!(created.get("id").and_then(Value::as_i64).is_some());
        assert_eq!(
            created.get("image_id").and_then(Value::as_str),
            Some("img-1")
        );

        let listed = list_as_json(&app, "/comments?imageId=img-1").await;
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0], created);
    }

    #[actix_web::test]
    async fn filtered_listing_excludes_other_images() {
        let app = actix_test::init_service(test_app(Arc::new(InMemoryCommentRepository::new())))
            .await;

        post_comment(&app, &request_body("ada", "about the first", Some("img-1"))).await;
        post_comment(&app, &request_body("grace", "about the second", Some("img-2"))).await;

        let listed = list_as_json(&app, "/comments?imageId=img-1").await;
        assert_eq!(listed.len(), 1);
        assert_eq!(
            listed[0].get("username").and_then(Value::as_str),
            Some("ada")
        );
    }

    #[rstest]
    #[case("/comments")]
    #[case("/comments?imageId=")]
    #[case("/comments?imageId=%20%20")]
    #[actix_web::test]
    async fn blank_filter_lists_everything(#[case] uri: &str) {
        let app = actix_test::init_service(test_app(Arc::new(InMemoryCommentRepository::new())))
            .await;

        post_comment(&app, &request_body("ada", "about the first", Some("img-1"))).await;
        post_comment(&app, &request_body("grace", "a global note", None)).await;

        let listed = list_as_json(&app, uri).await;
        assert_eq!(listed.len(), 2);
    }

    #[actix_web::test]
    async fn unfiltered_listing_returns_newest_first() {
        let app = actix_test::init_service(test_app(Arc::new(InMemoryCommentRepository::new())))
            .await;

        post_comment(&app, &request_body("ada", "older entry", None)).await;
        post_comment(&app, &request_body("grace", "newer entry", None)).await;

        let listed = list_as_json(&app, "/comments").await;
        let ids: Vec<i64> = listed
            .iter()
            .filter_map(|row| row.get("id").and_then(Value::as_i64))
            .collect();
        assert_eq!(ids.len(), 2);
        assert!(ids[0] > ids[1], "newest comment must come first");
    }

    #[rstest]
    #[case("", "a perfectly fine comment", "username", "empty_username", "Missing data")]
    #[case("ada", "", "content", "empty_content", "Missing data")]
    #[case(
        "ada",
        "hey",
        "content",
        "content_too_short",
        "content must be at least 5 characters long"
    )]
    #[actix_web::test]
    async fn invalid_drafts_are_rejected_and_store_is_unchanged(
        #[case] username: &str,
        #[case] content: &str,
        #[case] field: &str,
        #[case] code: &str,
        #[case] message: &str,
    ) {
        let repository = Arc::new(InMemoryCommentRepository::new());
        let app = actix_test::init_service(test_app(repository.clone())).await;

        let response = post_comment(&app, &request_body(username, content, Some("img-1"))).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
        assert_eq!(value.get("message").and_then(Value::as_str), Some(message));
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
        let details = value
            .get("details")
            .and_then(Value::as_object)
            .expect("details present");
        assert_eq!(details.get("field").and_then(Value::as_str), Some(field));
        assert_eq!(details.get("code").and_then(Value::as_str), Some(code));

        assert!(repository.is_empty(), "rejected drafts must not be stored");
    }

    #[rstest]
    #[case(r#"{"content":"a perfectly fine comment"}"#)]
    #[case(r#"{"username":"ada"}"#)]
    #[case(r#"not json"#)]
    #[actix_web::test]
    async fn absent_fields_keep_the_error_shape(#[case] payload: &'static str) {
        let repository = Arc::new(InMemoryCommentRepository::new());
        let app = actix_test::init_service(test_app(repository.clone())).await;

        let request = actix_test::TestRequest::post()
            .uri("/comments")
            .insert_header((actix_web::http::header::CONTENT_TYPE, "application/json"))
            .set_payload(payload)
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), actix_web::http::StatusCode::BAD_REQUEST);

        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
        assert_eq!(
            value.get("code").and_then(Value::as_str),
            Some("invalid_request")
        );
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("Missing data")
        );

        assert!(repository.is_empty(), "rejected bodies must not be stored");
    }

    #[actix_web::test]
    async fn store_failures_surface_as_opaque_500s() {
        let app = actix_test::init_service(test_app(Arc::new(FailingCommentRepository))).await;

        let response = post_comment(&app, &request_body("ada", "what a view", None)).await;
        assert_eq!(
            response.status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
        let value: Value =
            serde_json::from_slice(&actix_test::read_body(response).await).expect("error payload");
        assert_eq!(
            value.get("message").and_then(Value::as_str),
            Some("Internal server error")
        );
    }
}
