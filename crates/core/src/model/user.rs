use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::ids::UserId;

/// Platform role of a signed-in account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum UserRole {
    #[default]
    Student,
    Instructor,
    Admin,
    Recruiter,
}

impl UserRole {
    pub const ALL: [UserRole; 4] = [
        UserRole::Student,
        UserRole::Instructor,
        UserRole::Admin,
        UserRole::Recruiter,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Instructor => "instructor",
            UserRole::Admin => "admin",
            UserRole::Recruiter => "recruiter",
        }
    }

    /// Parse a role, treating unknown values as `Student`.
    #[must_use]
    pub fn parse_lenient(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "instructor" => Self::Instructor,
            "admin" => Self::Admin,
            "recruiter" => Self::Recruiter,
            _ => Self::Student,
        }
    }

    /// Roles allowed into the admin panels.
    #[must_use]
    pub fn can_manage_catalog(self) -> bool {
        matches!(self, UserRole::Admin | UserRole::Instructor)
    }

    #[must_use]
    pub fn is_admin(self) -> bool {
        self == UserRole::Admin
    }
}

impl From<String> for UserRole {
    fn from(value: String) -> Self {
        Self::parse_lenient(&value)
    }
}

impl From<UserRole> for String {
    fn from(value: UserRole) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Account returned by the auth and admin endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: UserRole,
}

impl AuthUser {
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }
}
