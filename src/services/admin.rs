// Admin panel API: the one place admin authentication lives, alongside
// payments and plan management.

use serde_json::Value;

use crate::api::endpoints;
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::models::{AdminAuthPayload, Payment, Plan};
use crate::types::{ApiResponse, PlanId};
use crate::validation::{AdminPlanInput, LoginInput};

#[derive(Debug, Clone)]
pub struct AdminService {
    client: ApiClient,
}

impl AdminService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn login(&self, credentials: &LoginInput) -> ClientResult<ApiResponse<AdminAuthPayload>> {
        self.client.send_json(&endpoints::admin::LOGIN, credentials).await
    }

    pub async fn logout(&self) -> ClientResult<ApiResponse<Value>> {
        self.client.send(&endpoints::admin::LOGOUT).await
    }

    pub async fn refresh(&self) -> ClientResult<ApiResponse<AdminAuthPayload>> {
        self.client.send(&endpoints::admin::REFRESH).await
    }

    pub async fn payments(&self) -> ClientResult<ApiResponse<Vec<Payment>>> {
        self.client.send(&endpoints::admin::PAYMENTS).await
    }

    pub async fn plans(&self) -> ClientResult<ApiResponse<Vec<Plan>>> {
        self.client.send(&endpoints::admin::PLANS).await
    }

    pub async fn update_plan(&self, plan_id: &PlanId, plan: &AdminPlanInput) -> ClientResult<ApiResponse<Plan>> {
        self.client
            .send_json(&endpoints::admin::update_plan(plan_id), plan)
            .await
    }
}
