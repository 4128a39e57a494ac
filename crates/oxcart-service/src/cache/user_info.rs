//! User profile info cache.

use super::{keys, CacheBackend, CachePolicy, TypedCache};
use crate::dto::UserInfoResponse;
use oxcart_core::UserId;
use std::sync::Arc;
use std::time::Duration;

/// 12 hours sliding; each profile read re-arms the window.
const USER_INFO_POLICY: CachePolicy = CachePolicy::sliding(Duration::from_secs(12 * 60 * 60));

/// Cache for user profile info under `user:{id}`. Read-through on fetch;
/// profile updates overwrite directly since the caller already holds the
/// fresh value.
#[derive(Clone)]
pub struct UserInfoCache {
    cache: TypedCache,
}

impl UserInfoCache {
    /// Creates a user info cache over a raw backend.
    #[must_use]
    pub fn new(backend: Arc<dyn CacheBackend>) -> Self {
        Self {
            cache: TypedCache::new(backend),
        }
    }

    /// Returns the cached profile, `None` on miss.
    pub async fn user(&self, user_id: UserId) -> Option<UserInfoResponse> {
        self.cache.get(&keys::user_info(user_id)).await
    }

    /// Overwrites the cached profile.
    pub async fn set_user(&self, user: &UserInfoResponse) {
        self.cache
            .set(&keys::user_info(user.id), user, &USER_INFO_POLICY)
            .await;
    }
}
