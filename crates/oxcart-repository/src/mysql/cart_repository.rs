//! MySQL cart line repository implementation.

use crate::pool::DatabasePool;
use crate::traits::CartRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use oxcart_core::{CartLine, CartLineId, NewCartLine, OxcartError, OxcartResult, ProductId, UserId};
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// MySQL cart line repository.
///
/// Every operation is a single statement; concurrent edits to the same line
/// are serialized by InnoDB row locks and resolve last-write-wins.
#[derive(Clone)]
pub struct MySqlCartRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlCartRepository {
    /// Creates a new MySQL cart repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a cart line.
#[derive(Debug, FromRow)]
struct CartLineRow {
    id: i64,
    user_id: String,
    product_id: String,
    quantity: i32,
    created_at: DateTime<Utc>,
}

impl TryFrom<CartLineRow> for CartLine {
    type Error = OxcartError;

    fn try_from(row: CartLineRow) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&row.user_id)
            .map_err(|e| OxcartError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(CartLine {
            id: CartLineId(row.id),
            user_id: UserId::from_uuid(user_id),
            product_id: ProductId::new_unchecked(row.product_id),
            quantity: row.quantity,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl CartRepository for MySqlCartRepository {
    async fn find_by_id(&self, id: CartLineId) -> OxcartResult<Option<CartLine>> {
        debug!("Finding cart line by id: {}", id);

        let row = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT id, user_id, product_id, quantity, created_at
            FROM cart_lines
            WHERE id = ?
            "#,
        )
        .bind(id.into_inner())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(CartLine::try_from).transpose()
    }

    async fn find_by_user_and_product(
        &self,
        user_id: UserId,
        product_id: &ProductId,
    ) -> OxcartResult<Option<CartLine>> {
        let row = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT id, user_id, product_id, quantity, created_at
            FROM cart_lines
            WHERE user_id = ? AND product_id = ?
            "#,
        )
        .bind(user_id.to_string())
        .bind(product_id.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(CartLine::try_from).transpose()
    }

    async fn find_by_user(&self, user_id: UserId) -> OxcartResult<Vec<CartLine>> {
        let rows = sqlx::query_as::<_, CartLineRow>(
            r#"
            SELECT id, user_id, product_id, quantity, created_at
            FROM cart_lines
            WHERE user_id = ?
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id.to_string())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(CartLine::try_from).collect()
    }

    async fn count_by_user(&self, user_id: UserId) -> OxcartResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM cart_lines WHERE user_id = ?")
            .bind(user_id.to_string())
            .fetch_one(self.pool.inner())
            .await?;

        Ok(count as u64)
    }

    async fn insert(&self, line: &NewCartLine) -> OxcartResult<CartLine> {
        debug!(
            "Inserting cart line: user={} product={}",
            line.user_id, line.product_id
        );

        let result = sqlx::query(
            r#"
            INSERT INTO cart_lines (user_id, product_id, quantity, created_at)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(line.user_id.to_string())
        .bind(line.product_id.as_str())
        .bind(line.quantity)
        .bind(line.created_at)
        .execute(self.pool.inner())
        .await?;

        let id = CartLineId(result.last_insert_id() as i64);

        self.find_by_id(id)
            .await?
            .ok_or_else(|| OxcartError::Internal("Failed to fetch inserted cart line".to_string()))
    }

    async fn update_quantity(&self, id: CartLineId, quantity: i32) -> OxcartResult<()> {
        debug!("Updating cart line {} quantity to {}", id, quantity);

        sqlx::query("UPDATE cart_lines SET quantity = ? WHERE id = ?")
            .bind(quantity)
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(())
    }

    async fn delete(&self, id: CartLineId) -> OxcartResult<bool> {
        let result = sqlx::query("DELETE FROM cart_lines WHERE id = ?")
            .bind(id.into_inner())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_user(&self, user_id: UserId) -> OxcartResult<u64> {
        debug!("Deleting all cart lines for user: {}", user_id);

        let result = sqlx::query("DELETE FROM cart_lines WHERE user_id = ?")
            .bind(user_id.to_string())
            .execute(self.pool.inner())
            .await?;

        Ok(result.rows_affected())
    }
}

impl std::fmt::Debug for MySqlCartRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlCartRepository").finish_non_exhaustive()
    }
}
