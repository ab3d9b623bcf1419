pub mod billing;
pub mod notification;
pub mod project;
pub mod user;

pub use billing::{CheckoutSession, Payment, Plan, PlanDuration, Subscription};
pub use notification::Notification;
pub use project::{Application, Contributor, Project};
pub use user::{AdminAuthPayload, AuthPayload, User};
