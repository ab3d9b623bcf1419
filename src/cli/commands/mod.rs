pub mod admin;
pub mod auth;
pub mod favorites;
pub mod notifications;
pub mod projects;
pub mod subscriptions;
pub mod users;
