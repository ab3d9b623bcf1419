//! Backend endpoint descriptors and client-side route constants.
//!
//! Both tables are plain data: constants for fixed paths, pure functions
//! for paths that carry identifiers.

pub mod endpoints;
pub mod routes;

pub use endpoints::{Endpoint, HttpMethod};
