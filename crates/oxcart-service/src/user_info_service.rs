//! User profile service.

use crate::cache::UserInfoCache;
use crate::dto::{UserInfoResponse, UserInfoUpdateRequest};
use async_trait::async_trait;
use oxcart_core::{OxcartError, OxcartResult, UserId, ValidateExt};
use oxcart_repository::UserRepository;
use std::sync::Arc;
use tracing::{debug, info};

/// User profile service.
#[async_trait]
pub trait UserInfoService: Send + Sync {
    /// Fetches the caller's profile, cache-first.
    async fn get_user_info(&self, user_id: UserId) -> OxcartResult<UserInfoResponse>;

    /// Updates the caller's profile.
    async fn update_user_info(
        &self,
        user_id: UserId,
        request: UserInfoUpdateRequest,
    ) -> OxcartResult<UserInfoResponse>;
}

/// User profile service over the relational store and the user-info cache.
pub struct UserInfoServiceImpl<U> {
    users: Arc<U>,
    cache: UserInfoCache,
}

impl<U: UserRepository> UserInfoServiceImpl<U> {
    /// Creates a new user info service.
    pub fn new(users: Arc<U>, cache: UserInfoCache) -> Self {
        Self { users, cache }
    }
}

#[async_trait]
impl<U: UserRepository + 'static> UserInfoService for UserInfoServiceImpl<U> {
    async fn get_user_info(&self, user_id: UserId) -> OxcartResult<UserInfoResponse> {
        // Read-through with a sliding window: each hit re-arms the TTL.
        if let Some(cached) = self.cache.user(user_id).await {
            debug!("Cache hit for user info: {}", user_id);
            return Ok(cached);
        }

        let profile = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("User", user_id))?;

        let response = UserInfoResponse::from(profile);
        self.cache.set_user(&response).await;

        Ok(response)
    }

    async fn update_user_info(
        &self,
        user_id: UserId,
        request: UserInfoUpdateRequest,
    ) -> OxcartResult<UserInfoResponse> {
        debug!("Updating profile for user {}", user_id);

        request.validate_request()?;

        let mut profile = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("User", user_id))?;

        profile.update_profile(request.first_name, request.last_name);
        let updated = self.users.update(&profile).await?;

        // The caller already holds the fresh value: overwrite directly,
        // no read-through needed.
        let response = UserInfoResponse::from(updated);
        self.cache.set_user(&response).await;

        info!("Profile updated for user {}", user_id);
        Ok(response)
    }
}
