//! OpenAPI documentation configuration.
//!
//! The generated specification drives Swagger UI in debug builds. The API is
//! deliberately unauthenticated, so no security scheme is registered.

use utoipa::OpenApi;

use crate::domain::{Comment, Error, ErrorCode};
use crate::inbound::http::comments::CreateCommentRequest;

/// OpenAPI document for the comment REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Gallery comment service API",
        description = "Unauthenticated HTTP interface for listing and creating \
                       image comments, plus health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::comments::list_comments,
        crate::inbound::http::comments::create_comment,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(Comment, CreateCommentRequest, Error, ErrorCode)),
    tags(
        (name = "comments", description = "Listing and creating image comments"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
