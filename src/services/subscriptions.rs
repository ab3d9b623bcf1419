use serde::Serialize;

use crate::api::endpoints;
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::models::{CheckoutSession, Plan, PlanDuration, Subscription};
use crate::types::{ApiResponse, PlanId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutRequest<'a> {
    plan_id: &'a PlanId,
}

#[derive(Debug, Clone)]
pub struct SubscriptionService {
    client: ApiClient,
}

impl SubscriptionService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Plans on offer, optionally narrowed to one billing period
    pub async fn plans(&self, duration: Option<PlanDuration>) -> ClientResult<ApiResponse<Vec<Plan>>> {
        self.client
            .send(&endpoints::subscriptions::plans(duration))
            .await
            .inspect_err(|e| tracing::error!("Failed to load subscription plans: {}", e))
    }

    /// Start a hosted checkout for `plan_id`
    pub async fn checkout(&self, plan_id: &PlanId) -> ClientResult<ApiResponse<CheckoutSession>> {
        self.client
            .send_json(&endpoints::payments::SUBSCRIPTION_CHECKOUT, &CheckoutRequest { plan_id })
            .await
            .inspect_err(|e| tracing::error!(plan_id = %plan_id, "Subscription checkout failed: {}", e))
    }

    pub async fn list(&self) -> ClientResult<ApiResponse<Vec<Subscription>>> {
        self.client.send(&endpoints::subscriptions::LIST).await
    }
}
