use serde_json::{json, Value};

use crate::api::endpoints;
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::models::Notification;
use crate::types::{ApiResponse, NotificationId};

#[derive(Debug, Clone)]
pub struct NotificationService {
    client: ApiClient,
}

impl NotificationService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> ClientResult<ApiResponse<Vec<Notification>>> {
        self.client.send(&endpoints::notifications::LIST).await
    }

    pub async fn mark_read(&self, id: &NotificationId) -> ClientResult<ApiResponse<Notification>> {
        self.client
            .send_json(&endpoints::notifications::mark_read(id), &json!({ "read": true }))
            .await
    }

    pub async fn mark_all_read(&self) -> ClientResult<ApiResponse<Value>> {
        self.client.send(&endpoints::notifications::MARK_ALL).await
    }
}
