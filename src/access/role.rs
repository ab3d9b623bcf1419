use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::sections::allowed_sections;
use super::AccessError;
use crate::models::Project;
use crate::types::UserId;

/// A user's relationship to one project. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Creator,
    Contributor,
    Viewer,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Creator, Role::Contributor, Role::Viewer];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Creator => "CREATOR",
            Role::Contributor => "CONTRIBUTOR",
            Role::Viewer => "VIEWER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CREATOR" => Ok(Role::Creator),
            "CONTRIBUTOR" => Ok(Role::Contributor),
            "VIEWER" => Ok(Role::Viewer),
            _ => Err(AccessError::UnknownRole(s.to_string())),
        }
    }
}

/// Role of `user` on `project`.
///
/// Creator is checked before contributor, so a creator who is also listed
/// as a contributor is still a creator. No project or no user is a viewer.
pub fn derive_role(project: Option<&Project>, user: Option<&UserId>) -> Role {
    let (project, user) = match (project, user) {
        (Some(project), Some(user)) => (project, user),
        _ => return Role::Viewer,
    };

    if project.is_creator(user) {
        Role::Creator
    } else if project.is_contributor(user) {
        Role::Contributor
    } else {
        Role::Viewer
    }
}

/// Role plus the sections it unlocks, recomputed on every call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectAccess {
    pub role: Role,
    pub sections: &'static [&'static str],
}

impl ProjectAccess {
    pub fn resolve(project: Option<&Project>, user: Option<&UserId>) -> Self {
        Self::for_role(derive_role(project, user))
    }

    pub fn for_role(role: Role) -> Self {
        Self {
            role,
            sections: allowed_sections(role),
        }
    }

    pub fn can_view(&self, section: &str) -> bool {
        self.sections.contains(&section)
    }

    pub fn is_creator(&self) -> bool {
        self.role == Role::Creator
    }

    /// Creator or contributor
    pub fn is_member(&self) -> bool {
        matches!(self.role, Role::Creator | Role::Contributor)
    }
}
