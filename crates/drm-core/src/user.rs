//! # System Users and Roles

use serde::{Deserialize, Serialize};

use crate::identity::{RegionId, UserId};

/// Access role attached to a user. Role comparison is the only access
/// control in the system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    /// Global access.
    Admin,
    /// Regional staff; visibility may be narrowed to an assigned district.
    Staff,
    /// Read-oriented oversight role.
    Supervisor,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Admin => "ADMIN",
            Self::Staff => "STAFF",
            Self::Supervisor => "SUPERVISOR",
        };
        f.write_str(s)
    }
}

/// A system user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Login name. Matching is trimmed and case-insensitive per role.
    pub username: String,
    /// Access role.
    pub role: UserRole,
    /// For STAFF: the DISTRICT-level region their visibility narrows to.
    pub assigned_district: Option<RegionId>,
}

impl User {
    /// Create a user record.
    pub fn new(
        username: impl Into<String>,
        role: UserRole,
        assigned_district: Option<RegionId>,
    ) -> Self {
        Self {
            id: UserId::new(),
            username: username.into(),
            role,
            assigned_district,
        }
    }

    /// Whether this user matches the supplied login credentials.
    pub fn matches_login(&self, username: &str, role: UserRole) -> bool {
        self.role == role && self.username.trim().eq_ignore_ascii_case(username.trim())
    }
}
