//! MySQL order repository implementation.

use crate::pool::DatabasePool;
use crate::traits::OrderRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use oxcart_core::{
    Order, OrderId, OrderLine, OrderStatus, OxcartError, OxcartResult, PaymentStatus, ProductId,
    ShippingAddress, UserId,
};
use rust_decimal::Decimal;
use sqlx::mysql::MySqlConnection;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

/// MySQL order repository.
///
/// Inserts, updates, and deletes run inside an explicit transaction
/// (rollback on drop) so no partial order is ever visible. Line persistence
/// on update is delete-and-reinsert within that transaction; line IDs are
/// not stable across updates.
#[derive(Clone)]
pub struct MySqlOrderRepository {
    pool: Arc<DatabasePool>,
}

impl MySqlOrderRepository {
    /// Creates a new MySQL order repository.
    #[must_use]
    pub fn new(pool: Arc<DatabasePool>) -> Self {
        Self { pool }
    }

    async fn load_header(
        &self,
        conn: &mut MySqlConnection,
        id: OrderId,
    ) -> OxcartResult<Option<OrderRow>> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {HEADER_COLUMNS} FROM orders WHERE id = ?"
        ))
        .bind(id.into_inner())
        .fetch_optional(conn)
        .await?;

        Ok(row)
    }

    async fn load_lines(
        &self,
        conn: &mut MySqlConnection,
        order_id: i64,
    ) -> OxcartResult<Vec<OrderLine>> {
        let rows = sqlx::query_as::<_, OrderLineRow>(
            r#"
            SELECT id, order_id, product_id, product_name, product_price, quantity, line_total
            FROM order_lines
            WHERE order_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(order_id)
        .fetch_all(conn)
        .await?;

        Ok(rows.into_iter().map(OrderLine::from).collect())
    }

    async fn insert_lines(
        &self,
        conn: &mut MySqlConnection,
        order_id: i64,
        lines: &[OrderLine],
    ) -> OxcartResult<()> {
        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO order_lines
                    (order_id, product_id, product_name, product_price, quantity, line_total)
                VALUES (?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(order_id)
            .bind(line.product_id.as_str())
            .bind(&line.product_name)
            .bind(line.product_price)
            .bind(line.quantity)
            .bind(line.line_total)
            .execute(&mut *conn)
            .await?;
        }
        Ok(())
    }

    async fn assemble(
        &self,
        conn: &mut MySqlConnection,
        row: OrderRow,
    ) -> OxcartResult<Order> {
        let lines = self.load_lines(conn, row.id).await?;
        let mut order = Order::try_from(row)?;
        order.lines = lines;
        Ok(order)
    }
}

/// Database row representation of an order header.
#[derive(Debug, FromRow)]
struct OrderRow {
    id: i64,
    user_id: String,
    order_number: String,
    order_date: DateTime<Utc>,
    status: String,
    payment_status: String,
    payment_method: Option<String>,
    shipping_line1: String,
    shipping_line2: Option<String>,
    shipping_city: String,
    shipping_state: String,
    shipping_country: String,
    shipping_postal_code: String,
    subtotal: Decimal,
    delivery_fee: Decimal,
    total: Decimal,
}

impl TryFrom<OrderRow> for Order {
    type Error = OxcartError;

    fn try_from(row: OrderRow) -> Result<Self, Self::Error> {
        let user_id = Uuid::parse_str(&row.user_id)
            .map_err(|e| OxcartError::Internal(format!("Invalid UUID in database: {}", e)))?;

        Ok(Order {
            id: OrderId(row.id),
            user_id: UserId::from_uuid(user_id),
            order_number: row.order_number,
            order_date: row.order_date,
            status: OrderStatus::parse(&row.status),
            payment_status: PaymentStatus::parse(&row.payment_status),
            payment_method: row.payment_method,
            shipping_address: ShippingAddress {
                line1: row.shipping_line1,
                line2: row.shipping_line2,
                city: row.shipping_city,
                state: row.shipping_state,
                country: row.shipping_country,
                postal_code: row.shipping_postal_code,
            },
            subtotal: row.subtotal,
            delivery_fee: row.delivery_fee,
            total: row.total,
            lines: Vec::new(),
        })
    }
}

/// Database row representation of an order line.
#[derive(Debug, FromRow)]
struct OrderLineRow {
    id: i64,
    order_id: i64,
    product_id: String,
    product_name: String,
    product_price: Decimal,
    quantity: i32,
    line_total: Decimal,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        Self {
            id: row.id,
            order_id: row.order_id,
            product_id: ProductId::new_unchecked(row.product_id),
            product_name: row.product_name,
            product_price: row.product_price,
            quantity: row.quantity,
            line_total: row.line_total,
        }
    }
}

const HEADER_COLUMNS: &str = "id, user_id, order_number, order_date, status, payment_status, \
     payment_method, shipping_line1, shipping_line2, shipping_city, shipping_state, \
     shipping_country, shipping_postal_code, subtotal, delivery_fee, total";

#[async_trait]
impl OrderRepository for MySqlOrderRepository {
    async fn find_by_id(&self, id: OrderId) -> OxcartResult<Option<Order>> {
        debug!("Finding order by id: {}", id);

        let mut conn = self.pool.acquire().await?;

        match self.load_header(&mut conn, id).await? {
            Some(row) => Ok(Some(self.assemble(&mut conn, row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_number(&self, order_number: &str) -> OxcartResult<Option<Order>> {
        debug!("Finding order by number: {}", order_number);

        let mut conn = self.pool.acquire().await?;

        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {HEADER_COLUMNS} FROM orders WHERE order_number = ?"
        ))
        .bind(order_number)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(row) => Ok(Some(self.assemble(&mut conn, row).await?)),
            None => Ok(None),
        }
    }

    async fn find_by_user(&self, user_id: UserId) -> OxcartResult<Vec<Order>> {
        debug!("Finding orders for user: {}", user_id);

        let mut conn = self.pool.acquire().await?;

        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {HEADER_COLUMNS} FROM orders WHERE user_id = ? ORDER BY order_date DESC"
        ))
        .bind(user_id.to_string())
        .fetch_all(&mut *conn)
        .await?;

        let mut orders = Vec::with_capacity(rows.len());
        for row in rows {
            orders.push(self.assemble(&mut conn, row).await?);
        }

        Ok(orders)
    }

    async fn insert(&self, order: &Order) -> OxcartResult<Order> {
        debug!("Inserting order: {}", order.order_number);

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders
                (user_id, order_number, order_date, status, payment_status, payment_method,
                 shipping_line1, shipping_line2, shipping_city, shipping_state,
                 shipping_country, shipping_postal_code, subtotal, delivery_fee, total)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(order.user_id.to_string())
        .bind(&order.order_number)
        .bind(order.order_date)
        .bind(order.status.to_string())
        .bind(order.payment_status.to_string())
        .bind(&order.payment_method)
        .bind(&order.shipping_address.line1)
        .bind(&order.shipping_address.line2)
        .bind(&order.shipping_address.city)
        .bind(&order.shipping_address.state)
        .bind(&order.shipping_address.country)
        .bind(&order.shipping_address.postal_code)
        .bind(order.subtotal)
        .bind(order.delivery_fee)
        .bind(order.total)
        .execute(&mut *tx)
        .await?;

        let order_id = result.last_insert_id() as i64;
        self.insert_lines(&mut tx, order_id, &order.lines).await?;

        let row = self
            .load_header(&mut tx, OrderId(order_id))
            .await?
            .ok_or_else(|| OxcartError::Internal("Failed to fetch inserted order".to_string()))?;
        let persisted = self.assemble(&mut tx, row).await?;

        tx.commit().await?;

        Ok(persisted)
    }

    async fn update(&self, order: &Order) -> OxcartResult<Order> {
        debug!("Updating order: {}", order.id);

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE orders
            SET status = ?, payment_status = ?, payment_method = ?,
                shipping_line1 = ?, shipping_line2 = ?, shipping_city = ?,
                shipping_state = ?, shipping_country = ?, shipping_postal_code = ?,
                subtotal = ?, delivery_fee = ?, total = ?
            WHERE id = ?
            "#,
        )
        .bind(order.status.to_string())
        .bind(order.payment_status.to_string())
        .bind(&order.payment_method)
        .bind(&order.shipping_address.line1)
        .bind(&order.shipping_address.line2)
        .bind(&order.shipping_address.city)
        .bind(&order.shipping_address.state)
        .bind(&order.shipping_address.country)
        .bind(&order.shipping_address.postal_code)
        .bind(order.subtotal)
        .bind(order.delivery_fee)
        .bind(order.total)
        .bind(order.id.into_inner())
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM order_lines WHERE order_id = ?")
            .bind(order.id.into_inner())
            .execute(&mut *tx)
            .await?;

        self.insert_lines(&mut tx, order.id.into_inner(), &order.lines)
            .await?;

        let row = self
            .load_header(&mut tx, order.id)
            .await?
            .ok_or_else(|| OxcartError::Internal("Failed to fetch updated order".to_string()))?;
        let persisted = self.assemble(&mut tx, row).await?;

        tx.commit().await?;

        Ok(persisted)
    }

    async fn delete(&self, id: OrderId) -> OxcartResult<()> {
        debug!("Deleting order: {}", id);

        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM order_lines WHERE order_id = ?")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM orders WHERE id = ?")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

impl std::fmt::Debug for MySqlOrderRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlOrderRepository").finish_non_exhaustive()
    }
}
