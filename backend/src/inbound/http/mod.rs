//! HTTP inbound adapter exposing the REST endpoints.

pub mod comments;
pub mod error;
pub mod health;
pub mod state;

pub use error::{ApiResult, json_error_config};
