//! Projects and users.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::envelope::Detailed;

/// A Planka project, the top-level container of boards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Whether the project is hidden from the current user's dashboard.
    #[serde(default)]
    pub is_hidden: bool,
    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Resources returned alongside a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProjectIncluded {
    /// Boards of the project.
    pub boards: Vec<Board>,
    /// Users related to the project.
    pub users: Vec<User>,
}

/// A project with its boards.
pub type ProjectDetails = Detailed<Project, ProjectIncluded>;

/// The role of a Planka user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum UserRole {
    /// Server administrator.
    Admin,
    /// Can create and manage projects.
    ProjectOwner,
    /// Regular member.
    #[default]
    BoardUser,
}

/// A Planka user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Login name, if visible to the current user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Email address, if visible to the current user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Server role, if visible to the current user.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
}

impl User {
    /// Returns whether the user is a server administrator.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Some(UserRole::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_details_from_server_json() {
        let json = r#"{
            "item": {
                "id": "1",
                "name": "Roadmap",
                "description": null,
                "isHidden": false,
                "createdAt": "2025-01-02T03:04:05.000Z",
                "ownerProjectManagerId": "9"
            },
            "included": {
                "boards": [
                    {"id": "10", "projectId": "1", "position": 65536, "name": "Q1"}
                ],
                "users": []
            }
        }"#;

        let details: ProjectDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.item.name, "Roadmap");
        assert!(details.item.created_at.is_some());
        assert_eq!(details.included.boards.len(), 1);
        assert_eq!(details.included.boards[0].position, 65_536);
    }

    #[test]
    fn user_role_parsing() {
        let user: User =
            serde_json::from_str(r#"{"id": "1", "name": "Ada", "role": "admin"}"#).unwrap();
        assert!(user.is_admin());

        let user: User =
            serde_json::from_str(r#"{"id": "2", "name": "Bob", "role": "projectOwner"}"#).unwrap();
        assert_eq!(user.role, Some(UserRole::ProjectOwner));
        assert!(!user.is_admin());
    }
}
