//! One wrapper per backend domain.
//!
//! Every method issues exactly one request through the shared
//! [`ApiClient`](crate::http::ApiClient) and returns the decoded envelope
//! unmodified. Errors are propagated as-is: no retry, no caching, no
//! deduplication of identical in-flight calls.

pub mod admin;
pub mod auth;
pub mod favorites;
pub mod notifications;
pub mod projects;
pub mod subscriptions;
pub mod users;

pub use admin::AdminService;
pub use auth::AuthService;
pub use favorites::FavoritesService;
pub use notifications::NotificationService;
pub use projects::{NewProject, ProjectService};
pub use subscriptions::SubscriptionService;
pub use users::UserService;
