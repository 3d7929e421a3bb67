//! Domain primitives and use-cases.
//!
//! Purpose: define the comment entity with its validation boundary, the
//! transport-agnostic error payload, and the service orchestrating the
//! repository port. Inbound and outbound adapters depend on this module,
//! never the other way round.

pub mod comment;
pub mod comments_service;
pub mod error;
pub mod ports;

pub use self::comment::{Comment, CommentValidationError, NewComment, CONTENT_MIN};
pub use self::comments_service::CommentsService;
pub use self::error::{Error, ErrorCode};
