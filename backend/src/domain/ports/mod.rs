//! Domain ports: contracts the outbound adapters implement.

mod comment_repository;
mod macros;

pub(crate) use macros::define_port_error;

pub use comment_repository::{
    CommentRepository, CommentRepositoryError, FailingCommentRepository, InMemoryCommentRepository,
};
