//! Client library for the project-collaboration platform API.
//!
//! Endpoint tables, a credential-bearing HTTP client, one service wrapper per
//! backend domain, form validation, project role derivation and the auth
//! redirect guard.

pub mod access;
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod guard;
pub mod http;
pub mod models;
pub mod services;
pub mod session;
pub mod types;
pub mod validation;

pub use error::{ClientError, ClientResult};
pub use http::ApiClient;
