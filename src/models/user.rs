use serde::{Deserialize, Serialize};

use crate::types::UserId;

/// Read-only projection of the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// `data` of the login, register and refresh responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: User,
}

/// `data` of the admin login and refresh responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminAuthPayload {
    #[serde(alias = "user")]
    pub admin: User,
}
