//! Comment service backend.
//!
//! A small REST API for listing and creating image comments, structured
//! hexagonally: the domain defines entities, validation, and the repository
//! port; inbound HTTP handlers translate requests into domain calls; the
//! outbound persistence adapter implements the port against PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod server;
