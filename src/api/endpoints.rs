use std::borrow::Cow;
use std::fmt;
use url::form_urlencoded;

/// HTTP verbs used by the backend API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    pub fn to_reqwest(self) -> reqwest::Method {
        match self {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Method plus path (query string included) relative to the API base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub method: HttpMethod,
    pub path: Cow<'static, str>,
}

impl Endpoint {
    pub const fn new(method: HttpMethod, path: &'static str) -> Self {
        Self {
            method,
            path: Cow::Borrowed(path),
        }
    }

    pub const fn get(path: &'static str) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub const fn post(path: &'static str) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub const fn patch(path: &'static str) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub const fn delete(path: &'static str) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    fn owned(method: HttpMethod, path: String) -> Self {
        Self {
            method,
            path: Cow::Owned(path),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method.as_str(), self.path)
    }
}

/// Percent-encode an identifier for use as one path segment
fn segment(id: &str) -> String {
    form_urlencoded::byte_serialize(id.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn with_query(path: &str, pairs: &[(&str, String)]) -> String {
    if pairs.is_empty() {
        return path.to_string();
    }
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs.iter().map(|(k, v)| (*k, v.as_str())))
        .finish();
    format!("{}?{}", path, query)
}

pub mod auth {
    use super::*;

    pub const LOGIN: Endpoint = Endpoint::post("/auth/login");
    pub const REGISTER: Endpoint = Endpoint::post("/auth/register");
    pub const LOGOUT: Endpoint = Endpoint::post("/auth/logout");
    pub const REFRESH: Endpoint = Endpoint::post("/auth/refresh");
    pub const FORGOT_PASSWORD: Endpoint = Endpoint::post("/auth/forgot-password");
    pub const VERIFY_OTP: Endpoint = Endpoint::post("/auth/forgot-password/verify-otp");
    // Not under /auth on the backend
    pub const RESET_PASSWORD: Endpoint = Endpoint::post("/reset-password");

    /// Browser entry point of an OAuth sign-in flow
    pub fn oauth(provider: &str, redirect_url: &str) -> Endpoint {
        let path = format!("/auth/{}", segment(provider));
        Endpoint::owned(
            HttpMethod::Get,
            with_query(&path, &[("redirect", redirect_url.to_string())]),
        )
    }
}

pub mod users {
    use super::*;

    pub const ME: Endpoint = Endpoint::get("/users/me");
    pub const ONBOARDING: Endpoint = Endpoint::patch("/users/onboarding");
}

pub mod favorites {
    use super::*;
    use crate::types::{Page, ProjectId};

    pub const ADD: Endpoint = Endpoint::post("/favorites");

    pub fn list(page: Page) -> Endpoint {
        Endpoint::owned(
            HttpMethod::Get,
            with_query(
                "/favorites",
                &[("skip", page.skip.to_string()), ("limit", page.limit.to_string())],
            ),
        )
    }

    pub fn remove(project_id: &ProjectId) -> Endpoint {
        Endpoint::owned(
            HttpMethod::Delete,
            format!("/favorites/{}", segment(project_id.as_str())),
        )
    }
}

pub mod notifications {
    use super::*;
    use crate::types::NotificationId;

    pub const LIST: Endpoint = Endpoint::get("/notifications");
    pub const MARK_ALL: Endpoint = Endpoint::post("/notifications/mark-all");

    pub fn mark_read(id: &NotificationId) -> Endpoint {
        Endpoint::owned(
            HttpMethod::Patch,
            format!("/notifications/{}", segment(id.as_str())),
        )
    }
}

pub mod projects {
    use super::*;
    use crate::types::ProjectId;

    pub const CREATE: Endpoint = Endpoint::post("/projects");
    pub const LIST: Endpoint = Endpoint::get("/projects");

    pub fn apply(project_id: &ProjectId) -> Endpoint {
        Endpoint::owned(
            HttpMethod::Post,
            format!("/projects/{}/apply", segment(project_id.as_str())),
        )
    }
}

pub mod subscriptions {
    use super::*;
    use crate::models::PlanDuration;

    pub const LIST: Endpoint = Endpoint::get("/subscriptions");

    pub fn plans(duration: Option<PlanDuration>) -> Endpoint {
        let pairs: Vec<(&str, String)> = duration
            .map(|d| vec![("duration", d.as_str().to_string())])
            .unwrap_or_default();
        Endpoint::owned(HttpMethod::Get, with_query("/subscriptions/plans", &pairs))
    }
}

pub mod payments {
    use super::*;

    pub const SUBSCRIPTION_CHECKOUT: Endpoint = Endpoint::post("/payments/subscription-checkout");
}

pub mod admin {
    use super::*;
    use crate::types::PlanId;

    pub const LOGIN: Endpoint = Endpoint::post("/admin/auth/login");
    pub const LOGOUT: Endpoint = Endpoint::post("/admin/auth/logout");
    pub const REFRESH: Endpoint = Endpoint::post("/admin/auth/refresh");
    pub const PAYMENTS: Endpoint = Endpoint::get("/admin/payments");
    pub const PLANS: Endpoint = Endpoint::get("/admin/subscriptions/plans");

    pub fn update_plan(plan_id: &PlanId) -> Endpoint {
        Endpoint::owned(
            HttpMethod::Patch,
            format!("/admin/subscriptions/plans/{}", segment(plan_id.as_str())),
        )
    }
}
