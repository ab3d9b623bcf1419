use serde::Serialize;
use serde_json::Value;

use crate::api::endpoints;
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::models::Project;
use crate::types::{ApiResponse, Page, ProjectId};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FavoriteRequest<'a> {
    project_id: &'a ProjectId,
}

#[derive(Debug, Clone)]
pub struct FavoritesService {
    client: ApiClient,
}

impl FavoritesService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self, page: Page) -> ClientResult<ApiResponse<Vec<Project>>> {
        self.client.send(&endpoints::favorites::list(page)).await
    }

    pub async fn add(&self, project_id: &ProjectId) -> ClientResult<ApiResponse<Value>> {
        self.client
            .send_json(&endpoints::favorites::ADD, &FavoriteRequest { project_id })
            .await
    }

    pub async fn remove(&self, project_id: &ProjectId) -> ClientResult<ApiResponse<Value>> {
        self.client.send(&endpoints::favorites::remove(project_id)).await
    }
}
