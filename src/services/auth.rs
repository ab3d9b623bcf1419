use serde_json::Value;
use url::Url;

use crate::api::endpoints;
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::models::AuthPayload;
use crate::types::ApiResponse;
use crate::validation::{
    ForgotPasswordInput, LoginInput, ResetPasswordInput, SignupInput, VerifyOtpInput,
};

/// User authentication: sessions, registration and password recovery
#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// POST /auth/login. The session cookie lands in the client's jar.
    pub async fn login(&self, credentials: &LoginInput) -> ClientResult<ApiResponse<AuthPayload>> {
        self.client.send_json(&endpoints::auth::LOGIN, credentials).await
    }

    pub async fn register(&self, signup: &SignupInput) -> ClientResult<ApiResponse<AuthPayload>> {
        self.client.send_json(&endpoints::auth::REGISTER, signup).await
    }

    pub async fn logout(&self) -> ClientResult<ApiResponse<Value>> {
        self.client.send(&endpoints::auth::LOGOUT).await
    }

    /// POST /auth/refresh, renewing the session from the refresh cookie
    pub async fn refresh(&self) -> ClientResult<ApiResponse<AuthPayload>> {
        self.client.send(&endpoints::auth::REFRESH).await
    }

    pub async fn forgot_password(&self, input: &ForgotPasswordInput) -> ClientResult<ApiResponse<Value>> {
        self.client.send_json(&endpoints::auth::FORGOT_PASSWORD, input).await
    }

    pub async fn verify_otp(&self, input: &VerifyOtpInput) -> ClientResult<ApiResponse<Value>> {
        self.client.send_json(&endpoints::auth::VERIFY_OTP, input).await
    }

    pub async fn reset_password(&self, input: &ResetPasswordInput) -> ClientResult<ApiResponse<Value>> {
        self.client.send_json(&endpoints::auth::RESET_PASSWORD, input).await
    }

    /// Browser URL that starts an OAuth sign-in with `provider`. Makes no request.
    pub fn oauth_url(&self, provider: &str) -> ClientResult<Url> {
        let redirect = &self.client.config().auth.oauth_redirect_url;
        self.client.url_for(&endpoints::auth::oauth(provider, redirect))
    }
}
