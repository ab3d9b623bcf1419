//! Project roles and the UI sections each role may see.
//!
//! Advisory only: the backend enforces authorization on its own, this is
//! used to decide which tabs to offer.

pub mod role;
pub mod sections;

pub use role::{derive_role, ProjectAccess, Role};
pub use sections::allowed_sections;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}
