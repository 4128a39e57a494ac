//! Inventory reconciliation consumer.
//!
//! Decrements catalog stock from order-line batches queued at checkout,
//! independently of the request path. Stock is therefore eventually, not
//! immediately, consistent with committed orders.

use crate::error::{QueueError, QueueResult};
use crate::message::{QueuePayload, StockAdjustmentBatch, INVENTORY_CHANNEL};
use crate::worker::MessageHandler;
use async_trait::async_trait;
use oxcart_core::ProductId;
use oxcart_repository::ProductStore;
use std::sync::Arc;
use tracing::{error, info};

/// Handler for the `inventory` channel.
///
/// Redelivery tolerance: the decrement only applies while
/// `stock_quantity > quantity`, which bounds the damage of processing the
/// same batch twice but does not make the operation idempotent. A replayed
/// batch decrements again whenever stock still allows it.
pub struct InventoryHandler {
    products: Arc<dyn ProductStore>,
}

impl InventoryHandler {
    /// Creates an inventory handler over the product store.
    #[must_use]
    pub fn new(products: Arc<dyn ProductStore>) -> Self {
        Self { products }
    }

    async fn apply_batch(&self, batch: StockAdjustmentBatch) -> QueueResult<()> {
        info!(
            order_number = %batch.order_number,
            lines = batch.lines.len(),
            "Applying stock adjustments"
        );

        for line in batch.lines {
            // A bad line is skipped, never fails the whole batch.
            let product_id = match ProductId::parse(&line.product_id) {
                Ok(id) => id,
                Err(_) => {
                    error!(product_id = %line.product_id, "Invalid product ID format, skipping");
                    continue;
                }
            };

            let product = match self.products.find_by_id(&product_id).await? {
                Some(product) => product,
                None => {
                    error!(product_id = %product_id, "Product not found, skipping");
                    continue;
                }
            };

            let mut product = product;
            if product.decrement_stock(line.quantity) {
                self.products.replace(&product).await?;
                info!(
                    product_id = %product_id,
                    new_stock = product.stock_quantity,
                    "Updated inventory"
                );
            }
        }

        Ok(())
    }
}

#[async_trait]
impl MessageHandler for InventoryHandler {
    fn channel(&self) -> &'static str {
        INVENTORY_CHANNEL
    }

    async fn handle(&self, payload: QueuePayload) -> QueueResult<()> {
        match payload {
            QueuePayload::StockAdjustment(batch) => self.apply_batch(batch).await,
            other => Err(QueueError::Processing(format!(
                "Unexpected payload on inventory channel: {:?}",
                other
            ))),
        }
    }
}
