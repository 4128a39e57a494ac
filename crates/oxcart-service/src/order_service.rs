//! Order domain logic.
//!
//! Checkout validates every requested line against live catalog stock,
//! snapshots names and prices into the order, persists atomically, and only
//! then enqueues the stock adjustment: stock is eventually consistent with
//! committed orders, and a failed enqueue never rolls an order back.

use crate::cache::OrderListCache;
use crate::dto::{OrderCreateRequest, OrderResponse, OrderUpdateRequest};
use crate::order_number::generate_order_number;
use async_trait::async_trait;
use chrono::Utc;
use oxcart_core::{
    CatalogProduct, Order, OrderId, OrderLine, OrderStatus, OxcartError, OxcartResult, PaymentStatus,
    ProductId, UserId, ValidateExt,
};
use oxcart_queue::{
    EmailMessage, MessageQueue, QueuePayload, StockAdjustmentBatch, StockAdjustmentLine,
};
use oxcart_repository::{OrderRepository, ProductStore, UserRepository};
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Order service.
#[async_trait]
pub trait OrderService: Send + Sync {
    /// Creates an order from the requested lines (checkout).
    async fn create_order(
        &self,
        user_id: UserId,
        request: OrderCreateRequest,
    ) -> OxcartResult<OrderResponse>;

    /// Fetches one order by ID.
    async fn get_order(&self, user_id: UserId, order_id: OrderId) -> OxcartResult<OrderResponse>;

    /// Fetches one order by order number.
    async fn get_order_by_number(
        &self,
        user_id: UserId,
        order_number: &str,
    ) -> OxcartResult<OrderResponse>;

    /// Lists the caller's orders, newest first.
    async fn get_user_orders(&self, user_id: UserId) -> OxcartResult<Vec<OrderResponse>>;

    /// Applies a partial update to a pending order.
    async fn update_order(
        &self,
        user_id: UserId,
        order_id: OrderId,
        request: OrderUpdateRequest,
    ) -> OxcartResult<OrderResponse>;

    /// Deletes a pending order.
    async fn delete_order(&self, user_id: UserId, order_id: OrderId) -> OxcartResult<()>;

    /// Marks an order paid and completed; the terminal transition.
    async fn complete_order(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> OxcartResult<OrderResponse>;
}

/// Order service over the relational store, the catalog, the order-list
/// cache, and the message channels.
pub struct OrderServiceImpl<O, U, P> {
    orders: Arc<O>,
    users: Arc<U>,
    products: Arc<P>,
    cache: OrderListCache,
    queue: Arc<dyn MessageQueue>,
}

impl<O, U, P> OrderServiceImpl<O, U, P>
where
    O: OrderRepository,
    U: UserRepository,
    P: ProductStore,
{
    /// Creates a new order service.
    pub fn new(
        orders: Arc<O>,
        users: Arc<U>,
        products: Arc<P>,
        cache: OrderListCache,
        queue: Arc<dyn MessageQueue>,
    ) -> Self {
        Self {
            orders,
            users,
            products,
            cache,
            queue,
        }
    }

    async fn load_owned_order(&self, user_id: UserId, order_id: OrderId) -> OxcartResult<Order> {
        let order = self
            .orders
            .find_by_id(order_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("Order", order_id))?;

        if !order.is_owned_by(user_id) {
            return Err(OxcartError::forbidden(
                "You are not authorized to access this order",
            ));
        }

        Ok(order)
    }

    async fn load_product_for_line(
        &self,
        product_id: &str,
        quantity: i32,
    ) -> OxcartResult<CatalogProduct> {
        let product_id = ProductId::parse(product_id)?;

        let product = self
            .products
            .find_by_id(&product_id)
            .await?
            .ok_or_else(|| {
                OxcartError::business_rule(format!("Product with ID {} not found", product_id))
            })?;

        if !product.has_stock_for(quantity) {
            return Err(OxcartError::business_rule(format!(
                "Insufficient stock for product {}. Available: {}, Requested: {}",
                product.name, product.stock_quantity, quantity
            )));
        }

        Ok(product)
    }

    /// Enqueues the post-commit stock adjustment. The order already exists;
    /// a send failure is logged and left for a manual reconciliation sweep.
    async fn enqueue_stock_adjustment(&self, order: &Order) {
        let batch = StockAdjustmentBatch {
            order_number: order.order_number.clone(),
            lines: order
                .lines
                .iter()
                .map(|line| StockAdjustmentLine {
                    product_id: line.product_id.as_str().to_string(),
                    product_name: line.product_name.clone(),
                    quantity: line.quantity,
                })
                .collect(),
        };

        if let Err(e) = self
            .queue
            .send(&QueuePayload::StockAdjustment(batch))
            .await
        {
            warn!(
                order_number = %order.order_number,
                error = %e,
                "Failed to enqueue stock adjustment; stock will not reflect this order until reconciled"
            );
        }
    }

    async fn enqueue_email(&self, to: &str, subject: String, body: String) {
        let message = QueuePayload::Email(EmailMessage {
            to: to.to_string(),
            subject,
            body,
            message_type: "orders".to_string(),
        });

        if let Err(e) = self.queue.send(&message).await {
            warn!(error = %e, "Failed to enqueue order email");
        }
    }
}

#[async_trait]
impl<O, U, P> OrderService for OrderServiceImpl<O, U, P>
where
    O: OrderRepository + 'static,
    U: UserRepository + 'static,
    P: ProductStore + 'static,
{
    async fn create_order(
        &self,
        user_id: UserId,
        request: OrderCreateRequest,
    ) -> OxcartResult<OrderResponse> {
        debug!("Creating order for user {}", user_id);

        request.validate_request()?;

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("User", user_id))?;

        let mut lines = Vec::with_capacity(request.order_items.len());
        for item in &request.order_items {
            let product = self
                .load_product_for_line(&item.product_id, item.quantity)
                .await?;
            lines.push(OrderLine::snapshot(&product, item.quantity));
        }

        let mut order = Order {
            id: OrderId(0),
            user_id,
            order_number: generate_order_number(),
            order_date: Utc::now(),
            status: OrderStatus::Pending,
            payment_status: PaymentStatus::Pending,
            payment_method: request.payment_method.clone(),
            shipping_address: request.shipping_address(),
            subtotal: Decimal::ZERO,
            delivery_fee: request.delivery_fee,
            total: Decimal::ZERO,
            lines,
        };
        order.recompute_totals();

        // Atomic persist; rollback happens inside the repository on any
        // failure, so no partial order is ever visible.
        let persisted = self.orders.insert(&order).await?;

        info!(
            order_number = %persisted.order_number,
            user_id = %user_id,
            total = %persisted.total,
            "Order created"
        );

        // After commit only. Stock decrement is asynchronous from here on.
        self.enqueue_stock_adjustment(&persisted).await;
        self.enqueue_email(
            &user.email,
            format!("Order {} confirmed", persisted.order_number),
            format!(
                "Your order {} for {} is confirmed and pending payment.",
                persisted.order_number, persisted.total
            ),
        )
        .await;

        // The cached order list (if any) no longer matches the store.
        self.cache.clear(user_id).await;

        Ok(OrderResponse::from(persisted))
    }

    async fn get_order(&self, user_id: UserId, order_id: OrderId) -> OxcartResult<OrderResponse> {
        debug!("Getting order {} for user {}", order_id, user_id);

        if !self.users.exists(user_id).await? {
            return Err(OxcartError::not_found("User", user_id));
        }

        let order = self.load_owned_order(user_id, order_id).await?;
        Ok(OrderResponse::from(order))
    }

    async fn get_order_by_number(
        &self,
        user_id: UserId,
        order_number: &str,
    ) -> OxcartResult<OrderResponse> {
        debug!("Getting order {} for user {}", order_number, user_id);

        if !self.users.exists(user_id).await? {
            return Err(OxcartError::not_found("User", user_id));
        }

        let order = self
            .orders
            .find_by_number(order_number)
            .await?
            .ok_or_else(|| OxcartError::not_found("Order", order_number))?;

        if !order.is_owned_by(user_id) {
            return Err(OxcartError::forbidden(
                "You are not authorized to access this order",
            ));
        }

        Ok(OrderResponse::from(order))
    }

    async fn get_user_orders(&self, user_id: UserId) -> OxcartResult<Vec<OrderResponse>> {
        debug!("Listing orders for user {}", user_id);

        if let Some(cached) = self.cache.user_orders(user_id).await {
            return Ok(cached);
        }

        let orders = self.orders.find_by_user(user_id).await?;
        let responses: Vec<OrderResponse> =
            orders.into_iter().map(OrderResponse::from).collect();

        self.cache.set_user_orders(user_id, &responses).await;

        Ok(responses)
    }

    async fn update_order(
        &self,
        user_id: UserId,
        order_id: OrderId,
        request: OrderUpdateRequest,
    ) -> OxcartResult<OrderResponse> {
        debug!("Updating order {} for user {}", order_id, user_id);

        request.validate_request()?;

        let mut order = self.load_owned_order(user_id, order_id).await?;

        if order.is_completed() {
            return Err(OxcartError::business_rule("Cannot update a completed order"));
        }

        // Partial scalar patch: absent or blank fields leave existing
        // values untouched.
        if let Some(status) = request.status {
            order.status = status;
        }
        apply_if_present(&mut order.payment_method, &request.payment_method);
        apply_non_blank(&mut order.shipping_address.line1, &request.shipping_line1);
        apply_if_present(&mut order.shipping_address.line2, &request.shipping_line2);
        apply_non_blank(&mut order.shipping_address.city, &request.shipping_city);
        apply_non_blank(&mut order.shipping_address.state, &request.shipping_state);
        apply_non_blank(&mut order.shipping_address.country, &request.shipping_country);
        apply_non_blank(
            &mut order.shipping_address.postal_code,
            &request.shipping_postal_code,
        );

        if let Some(patches) = &request.order_items {
            if !patches.is_empty() {
                for patch in patches {
                    let product_id = ProductId::parse(&patch.product_id).map_err(|_| {
                        OxcartError::validation(format!(
                            "Invalid product ID format: {}",
                            patch.product_id
                        ))
                    })?;

                    let product = self
                        .products
                        .find_by_id(&product_id)
                        .await?
                        .ok_or_else(|| OxcartError::not_found("Product", &product_id))?;

                    if patch.quantity > product.stock_quantity {
                        return Err(OxcartError::business_rule(format!(
                            "Insufficient stock for product {}. Available: {}, Requested: {}",
                            product.name, product.stock_quantity, patch.quantity
                        )));
                    }

                    // Merge by product: client-supplied prices are never
                    // trusted, so name and price are re-snapshotted.
                    match order
                        .lines
                        .iter_mut()
                        .find(|line| line.product_id == product_id)
                    {
                        Some(line) => line.resnapshot(&product, patch.quantity),
                        None => order
                            .lines
                            .push(OrderLine::snapshot(&product, patch.quantity)),
                    }
                }

                // Lines patched to zero (or below) drop out; untouched
                // lines keep their existing totals.
                order.lines.retain(|line| line.quantity > 0);
                order.recompute_totals();
            }
        }

        let persisted = self.orders.update(&order).await?;
        let response = OrderResponse::from(persisted);

        // Rebuild-and-overwrite: the cached list entry is replaced, never
        // patched in place.
        self.cache.replace_order(&response).await;

        info!(order_id = %order_id, "Order updated");
        Ok(response)
    }

    async fn delete_order(&self, user_id: UserId, order_id: OrderId) -> OxcartResult<()> {
        debug!("Deleting order {} for user {}", order_id, user_id);

        let order = self.load_owned_order(user_id, order_id).await?;

        if order.is_completed() {
            return Err(OxcartError::business_rule("Cannot delete a completed order"));
        }

        self.orders.delete(order_id).await?;
        self.cache.clear(user_id).await;

        info!(order_id = %order_id, "Order deleted");
        Ok(())
    }

    async fn complete_order(
        &self,
        user_id: UserId,
        order_id: OrderId,
    ) -> OxcartResult<OrderResponse> {
        debug!("Completing order {} for user {}", order_id, user_id);

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| OxcartError::not_found("User", user_id))?;

        let mut order = self.load_owned_order(user_id, order_id).await?;

        order.complete();
        let persisted = self.orders.update(&order).await?;
        let response = OrderResponse::from(persisted);

        self.cache.replace_order(&response).await;
        self.enqueue_email(
            &user.email,
            format!("Receipt for order {}", response.order_number),
            format!(
                "Payment of {} for order {} was received.",
                response.total, response.order_number
            ),
        )
        .await;

        info!(order_number = %response.order_number, "Order completed");
        Ok(response)
    }
}

fn apply_if_present(target: &mut Option<String>, patch: &Option<String>) {
    if let Some(value) = patch {
        if !value.trim().is_empty() {
            *target = Some(value.clone());
        }
    }
}

fn apply_non_blank(target: &mut String, patch: &Option<String>) {
    if let Some(value) = patch {
        if !value.trim().is_empty() {
            *target = value.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::InMemoryCacheBackend;
    use crate::dto::{OrderItemCreate, OrderItemPatch};
    use crate::test_support::{
        test_product, test_user, MockOrderRepository, MockProductStore, MockUserRepository,
    };
    use oxcart_queue::{InMemoryMessageQueue, INVENTORY_CHANNEL};

    const PRODUCT_A: &str = "65b2f1d04c6e7a0012345678";
    const PRODUCT_B: &str = "65b2f1d04c6e7a0012345679";

    struct Fixture {
        service: OrderServiceImpl<MockOrderRepository, MockUserRepository, MockProductStore>,
        orders: Arc<MockOrderRepository>,
        queue: Arc<InMemoryMessageQueue>,
        cache: OrderListCache,
        user_id: UserId,
    }

    fn fixture() -> Fixture {
        fixture_with_products(vec![
            test_product(PRODUCT_A, 1000, 10),
            test_product(PRODUCT_B, 2500, 10),
        ])
    }

    fn fixture_with_products(products: Vec<oxcart_core::CatalogProduct>) -> Fixture {
        let user = test_user();
        let user_id = user.id;
        let orders = Arc::new(MockOrderRepository::default());
        let users = Arc::new(MockUserRepository::with_user(user));
        let products = Arc::new(MockProductStore::with_products(products));
        let cache = OrderListCache::new(Arc::new(InMemoryCacheBackend::new()));
        let queue = Arc::new(InMemoryMessageQueue::new());

        Fixture {
            service: OrderServiceImpl::new(
                orders.clone(),
                users,
                products,
                cache.clone(),
                queue.clone(),
            ),
            orders,
            queue,
            cache,
            user_id,
        }
    }

    fn checkout(items: Vec<(&str, i32)>, delivery_fee_cents: i64) -> OrderCreateRequest {
        OrderCreateRequest {
            order_items: items
                .into_iter()
                .map(|(product_id, quantity)| OrderItemCreate {
                    product_id: product_id.to_string(),
                    quantity,
                })
                .collect(),
            payment_method: Some("card".to_string()),
            shipping_line1: "1 Example St".to_string(),
            shipping_line2: None,
            shipping_city: "Sydney".to_string(),
            shipping_state: "NSW".to_string(),
            shipping_country: "AU".to_string(),
            shipping_postal_code: "2000".to_string(),
            delivery_fee: Decimal::new(delivery_fee_cents, 2),
        }
    }

    #[tokio::test]
    async fn test_create_order_totals_and_status() {
        let f = fixture();

        // 3 x $10.00 + 1 x $25.00, $5.00 delivery.
        let order = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 3), (PRODUCT_B, 1)], 500))
            .await
            .unwrap();

        assert_eq!(order.subtotal, Decimal::new(5500, 2));
        assert_eq!(order.total, Decimal::new(6000, 2));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.payment_status, PaymentStatus::Pending);
        assert!(order.order_number.starts_with("ORD-"));
        assert_eq!(order.items.len(), 2);
    }

    #[tokio::test]
    async fn test_create_order_snapshots_compare_price() {
        let mut discounted = test_product(PRODUCT_A, 1000, 10);
        discounted.compare_price = Some(Decimal::new(800, 2));
        let f = fixture_with_products(vec![discounted]);

        let order = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 2)], 0))
            .await
            .unwrap();

        assert_eq!(order.items[0].product_price, Decimal::new(800, 2));
        assert_eq!(order.subtotal, Decimal::new(1600, 2));
    }

    #[tokio::test]
    async fn test_create_order_insufficient_stock_message() {
        let f = fixture_with_products(vec![test_product(PRODUCT_A, 1000, 3)]);

        let err = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 5)], 0))
            .await
            .unwrap_err();

        match err {
            OxcartError::BusinessRule(msg) => {
                assert!(msg.contains("Insufficient stock"));
                assert!(msg.contains("Available: 3"));
                assert!(msg.contains("Requested: 5"));
            }
            other => panic!("Expected BusinessRule error, got {:?}", other),
        }

        // No order persisted, nothing enqueued.
        assert!(f.orders.find_by_user(f.user_id).await.unwrap().is_empty());
        assert_eq!(f.queue.len(INVENTORY_CHANNEL).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_create_order_enqueues_stock_adjustment_after_commit() {
        let f = fixture();

        let order = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 4)], 0))
            .await
            .unwrap();

        let deliveries = f.queue.receive(INVENTORY_CHANNEL, 32).await.unwrap();
        assert_eq!(deliveries.len(), 1);

        match deliveries[0].message.decode().unwrap() {
            QueuePayload::StockAdjustment(batch) => {
                assert_eq!(batch.order_number, order.order_number);
                assert_eq!(batch.lines.len(), 1);
                assert_eq!(batch.lines[0].product_id, PRODUCT_A);
                assert_eq!(batch.lines[0].quantity, 4);
            }
            other => panic!("Expected stock adjustment, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_order_for_unknown_user_is_rejected() {
        let f = fixture();

        let result = f
            .service
            .create_order(UserId::new(), checkout(vec![(PRODUCT_A, 1)], 0))
            .await;
        assert!(matches!(result.unwrap_err(), OxcartError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_create_order_unknown_product_is_bad_request() {
        let f = fixture();

        let result = f
            .service
            .create_order(
                f.user_id,
                checkout(vec![("65b2f1d04c6e7a00ffffffff", 1)], 0),
            )
            .await;
        assert!(matches!(result.unwrap_err(), OxcartError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_get_order_enforces_ownership() {
        let f = fixture();
        let intruder = test_user();

        let order = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 1)], 0))
            .await
            .unwrap();

        // Register the intruder so the user-exists check passes.
        let f2 = Fixture {
            service: OrderServiceImpl::new(
                f.orders.clone(),
                Arc::new(MockUserRepository::with_user(intruder.clone())),
                Arc::new(MockProductStore::default()),
                f.cache.clone(),
                f.queue.clone(),
            ),
            orders: f.orders.clone(),
            queue: f.queue.clone(),
            cache: f.cache.clone(),
            user_id: intruder.id,
        };

        let result = f2.service.get_order(intruder.id, order.id).await;
        assert!(matches!(result.unwrap_err(), OxcartError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_get_user_orders_read_through_cache() {
        let f = fixture();

        f.service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 1)], 0))
            .await
            .unwrap();

        // First list populates the cache from the store.
        let listed = f.service.get_user_orders(f.user_id).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(f.cache.user_orders(f.user_id).await.is_some());

        // Second list is served from the cache.
        let cached = f.service.get_user_orders(f.user_id).await.unwrap();
        assert_eq!(cached.len(), 1);
    }

    #[tokio::test]
    async fn test_update_patches_scalars_and_keeps_absent_fields() {
        let f = fixture();

        let order = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 1)], 0))
            .await
            .unwrap();

        let updated = f
            .service
            .update_order(
                f.user_id,
                order.id,
                OrderUpdateRequest {
                    shipping_city: Some("Melbourne".to_string()),
                    ..OrderUpdateRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.shipping_address.city, "Melbourne");
        assert_eq!(updated.shipping_address.line1, "1 Example St");
        assert_eq!(updated.subtotal, order.subtotal);
    }

    #[tokio::test]
    async fn test_update_line_to_zero_drops_it_and_recomputes_totals() {
        let f = fixture();

        let order = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 3), (PRODUCT_B, 1)], 500))
            .await
            .unwrap();
        assert_eq!(order.total, Decimal::new(6000, 2));

        let updated = f
            .service
            .update_order(
                f.user_id,
                order.id,
                OrderUpdateRequest {
                    order_items: Some(vec![OrderItemPatch {
                        product_id: PRODUCT_A.to_string(),
                        quantity: 0,
                    }]),
                    ..OrderUpdateRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.items.len(), 1);
        assert_eq!(updated.items[0].product_id.as_str(), PRODUCT_B);
        assert_eq!(updated.subtotal, Decimal::new(2500, 2));
        assert_eq!(updated.total, Decimal::new(3000, 2));
    }

    #[tokio::test]
    async fn test_update_merges_new_line_and_resnapshots_price() {
        let f = fixture();

        let order = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 1)], 0))
            .await
            .unwrap();

        let updated = f
            .service
            .update_order(
                f.user_id,
                order.id,
                OrderUpdateRequest {
                    order_items: Some(vec![OrderItemPatch {
                        product_id: PRODUCT_B.to_string(),
                        quantity: 2,
                    }]),
                    ..OrderUpdateRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.items.len(), 2);
        assert_eq!(updated.subtotal, Decimal::new(6000, 2));
        // Appended line snapshots the catalog price, not a client value.
        let appended = updated
            .items
            .iter()
            .find(|line| line.product_id.as_str() == PRODUCT_B)
            .unwrap();
        assert_eq!(appended.product_price, Decimal::new(2500, 2));
    }

    #[tokio::test]
    async fn test_update_refreshes_cached_order_list() {
        let f = fixture();

        let order = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 1)], 0))
            .await
            .unwrap();
        // Populate the list cache.
        f.service.get_user_orders(f.user_id).await.unwrap();

        f.service
            .update_order(
                f.user_id,
                order.id,
                OrderUpdateRequest {
                    shipping_city: Some("Perth".to_string()),
                    ..OrderUpdateRequest::default()
                },
            )
            .await
            .unwrap();

        let cached = f.cache.user_orders(f.user_id).await.unwrap();
        assert_eq!(cached[0].shipping_address.city, "Perth");
    }

    #[tokio::test]
    async fn test_completed_order_rejects_update_and_delete() {
        let f = fixture();

        let order = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 1)], 0))
            .await
            .unwrap();
        f.service.complete_order(f.user_id, order.id).await.unwrap();

        let update = f
            .service
            .update_order(f.user_id, order.id, OrderUpdateRequest::default())
            .await;
        assert!(matches!(update.unwrap_err(), OxcartError::BusinessRule(_)));

        let delete = f.service.delete_order(f.user_id, order.id).await;
        assert!(matches!(delete.unwrap_err(), OxcartError::BusinessRule(_)));
    }

    #[tokio::test]
    async fn test_complete_order_sets_terminal_status() {
        let f = fixture();

        let order = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 1)], 0))
            .await
            .unwrap();

        let completed = f.service.complete_order(f.user_id, order.id).await.unwrap();
        assert_eq!(completed.status, OrderStatus::Success);
        assert_eq!(completed.payment_status, PaymentStatus::Completed);

        let stored = f.orders.order(order.id).unwrap();
        assert!(stored.is_completed());
    }

    #[tokio::test]
    async fn test_delete_pending_order_removes_it() {
        let f = fixture();

        let order = f
            .service
            .create_order(f.user_id, checkout(vec![(PRODUCT_A, 1)], 0))
            .await
            .unwrap();

        f.service.delete_order(f.user_id, order.id).await.unwrap();
        assert!(f.orders.order(order.id).is_none());
    }

    #[tokio::test]
    async fn test_get_missing_order_is_not_found() {
        let f = fixture();

        let result = f.service.get_order(f.user_id, OrderId(999)).await;
        assert!(matches!(result.unwrap_err(), OxcartError::NotFound { .. }));
    }
}
