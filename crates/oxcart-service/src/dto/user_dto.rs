//! User profile DTOs.

use chrono::{DateTime, Utc};
use oxcart_core::{UserId, UserProfile, UserRole};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to update the caller's profile.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UserInfoUpdateRequest {
    #[validate(length(max = 64))]
    pub first_name: Option<String>,

    #[validate(length(max = 64))]
    pub last_name: Option<String>,
}

/// User profile response DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoResponse {
    pub id: UserId,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

impl From<UserProfile> for UserInfoResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            role: profile.role,
            created_at: profile.created_at,
        }
    }
}
