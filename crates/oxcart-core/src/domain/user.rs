//! User profile entity and roles.

use crate::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role attached to an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Customer,
    Admin,
}

impl UserRole {
    /// Whether this role satisfies the required role.
    #[must_use]
    pub const fn has_permission(self, required: UserRole) -> bool {
        match required {
            UserRole::Customer => true,
            UserRole::Admin => matches!(self, UserRole::Admin),
        }
    }

    /// Parses a role from its storage form.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => Self::Admin,
            _ => Self::Customer,
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Customer => write!(f, "customer"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// User profile as stored in the relational store.
///
/// Authentication happens upstream; the profile exists so ownership checks
/// can re-validate that the principal's user id still names a real user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Unique identifier, matching the authenticated principal's subject.
    pub id: UserId,

    /// Email address.
    pub email: String,

    /// First name.
    pub first_name: Option<String>,

    /// Last name.
    pub last_name: Option<String>,

    /// Role.
    pub role: UserRole,

    /// Account creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Updates the mutable profile fields.
    pub fn update_profile(&mut self, first_name: Option<String>, last_name: Option<String>) {
        self.first_name = first_name;
        self.last_name = last_name;
        self.updated_at = Utc::now();
    }
}
