use serde::{Deserialize, Serialize};

use crate::api::endpoints;
use crate::error::ClientResult;
use crate::http::ApiClient;
use crate::models::{Application, Project};
use crate::types::{ApiResponse, ProjectId};
use crate::validation::ApplyProjectInput;

/// Body of `POST /projects`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct ProjectService {
    client: ApiClient,
}

impl ProjectService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create(&self, project: &NewProject) -> ClientResult<ApiResponse<Project>> {
        self.client.send_json(&endpoints::projects::CREATE, project).await
    }

    pub async fn list(&self) -> ClientResult<ApiResponse<Vec<Project>>> {
        self.client.send(&endpoints::projects::LIST).await
    }

    pub async fn apply(
        &self,
        project_id: &ProjectId,
        application: &ApplyProjectInput,
    ) -> ClientResult<ApiResponse<Application>> {
        self.client
            .send_json(&endpoints::projects::apply(project_id), application)
            .await
    }
}
