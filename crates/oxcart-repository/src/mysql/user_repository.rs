//! MySQL user repository implementation.

use crate::pool::DatabasePool;
use crate::traits::UserRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use oxcart_core::{OxcartError, OxcartResult, UserId, UserProfile, UserRole};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// MySQL user repository.
#[derive(Clone)]
pub struct MySqlUserRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlUserRepository {
    /// Creates a new MySQL user repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String, // MySQL stores UUID as CHAR(36)
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
    role: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserProfile {
    type Error = OxcartError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id)
            .map_err(|e| OxcartError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(UserProfile {
            id: UserId::from_uuid(id),
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            role: UserRole::parse(&row.role),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for MySqlUserRepository {
    async fn find_by_id(&self, id: UserId) -> OxcartResult<Option<UserProfile>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, email, first_name, last_name, role, created_at, updated_at
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(UserProfile::try_from).transpose()
    }

    async fn exists(&self, id: UserId) -> OxcartResult<bool> {
        let result: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE id = ? LIMIT 1")
            .bind(id.to_string())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn update(&self, profile: &UserProfile) -> OxcartResult<UserProfile> {
        debug!("Updating user profile: {}", profile.id);

        // MySQL doesn't support RETURNING, so update then select
        sqlx::query(
            r#"
            UPDATE users
            SET email = ?, first_name = ?, last_name = ?, role = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&profile.email)
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(profile.role.to_string())
        .bind(profile.updated_at)
        .bind(profile.id.to_string())
        .execute(self.pool.inner())
        .await?;

        self.find_by_id(profile.id)
            .await?
            .ok_or_else(|| OxcartError::Internal("Failed to fetch updated user".to_string()))
    }
}

impl std::fmt::Debug for MySqlUserRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlUserRepository").finish_non_exhaustive()
    }
}
