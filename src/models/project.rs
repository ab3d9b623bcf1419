use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{ApplicationId, ProjectId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(alias = "_id")]
    pub id: ProjectId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub creator_id: UserId,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Project metadata this client does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Project {
    pub fn is_creator(&self, user_id: &UserId) -> bool {
        &self.creator_id == user_id
    }

    pub fn is_contributor(&self, user_id: &UserId) -> bool {
        self.contributors.iter().any(|c| &c.user_id == user_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub user_id: UserId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub joined_at: Option<DateTime<Utc>>,
}

/// An application to join a project, as returned by `POST /projects/{id}/apply`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(alias = "_id")]
    pub id: ApplicationId,
    pub project_id: ProjectId,
    pub user_id: UserId,
    #[serde(default)]
    pub cover_letter: String,
    #[serde(default)]
    pub expected_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}
