use crate::api::endpoints;
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::models::User;
use crate::types::ApiResponse;
use crate::validation::OnboardingInput;

#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// The user the current session cookie belongs to
    pub async fn me(&self) -> ClientResult<ApiResponse<User>> {
        self.client.send(&endpoints::users::ME).await
    }

    pub async fn complete_onboarding(&self, profile: &OnboardingInput) -> ClientResult<ApiResponse<User>> {
        self.client.send_json(&endpoints::users::ONBOARDING, profile).await
    }
}
