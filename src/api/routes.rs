// Client-side route table. Paths are what navigation targets; they have
// no meaning to the backend.

pub mod auth {
    pub const LOGIN: &str = "/login";
    pub const SIGNUP: &str = "/signup";
    pub const FORGOT_PASSWORD: &str = "/forgot-password";
    pub const VERIFY_OTP: &str = "/verify-otp";
    pub const RESET_PASSWORD: &str = "/reset-password";
    pub const OAUTH_CALLBACK: &str = "/auth/callback";

    /// Pages a signed-in user gets bounced away from
    pub const LOGIN_PAGES: &[&str] = &[LOGIN, SIGNUP, FORGOT_PASSWORD, VERIFY_OTP, RESET_PASSWORD];
}

pub mod user {
    pub const HOME: &str = "/home";
    pub const PROFILE: &str = "/profile";
    pub const ONBOARDING: &str = "/onboarding";
    pub const FAVORITES: &str = "/favorites";
    pub const NOTIFICATIONS: &str = "/notifications";
    pub const SUBSCRIPTION: &str = "/subscription";
}

pub mod projects {
    use crate::types::ProjectId;

    pub const LIST: &str = "/projects";
    pub const NEW: &str = "/projects/new";

    pub fn detail(id: &ProjectId) -> String {
        format!("/projects/{}", id)
    }
}

pub mod admin {
    use crate::types::PlanId;

    pub const LOGIN: &str = "/admin/login";
    pub const DASHBOARD: &str = "/admin";
    pub const USERS: &str = "/admin/users";
    pub const PAYMENTS: &str = "/admin/payments";
    pub const PLANS: &str = "/admin/plans";

    /// Pages a signed-in admin gets bounced away from
    pub const LOGIN_PAGES: &[&str] = &[LOGIN];

    pub fn plan_edit(id: &PlanId) -> String {
        format!("/admin/plans/{}", id)
    }
}

/// True when `path` is one of `pages`. Query strings, fragments and a
/// trailing slash are ignored.
pub fn is_one_of(path: &str, pages: &[&str]) -> bool {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    let path = if path.len() > 1 { path.trim_end_matches('/') } else { path };
    pages.contains(&path)
}
