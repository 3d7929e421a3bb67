//! PostgreSQL persistence built on Diesel with async connection pooling.

pub mod diesel_comment_repository;
pub mod models;
pub mod pool;
pub mod schema;

pub use diesel_comment_repository::DieselCommentRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
