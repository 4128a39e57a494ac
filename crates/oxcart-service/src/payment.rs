//! Payment intent service.
//!
//! The gateway integration is an external collaborator behind a narrow
//! trait: given an amount in minor units and a currency, it returns an
//! opaque client secret. This service only computes the amount, always from
//! catalog prices, never from client-supplied figures.

use crate::dto::{PaymentIntentRequest, PaymentIntentResponse};
use async_trait::async_trait;
use oxcart_core::{OxcartError, OxcartResult, ProductId, ValidateExt};
use oxcart_repository::ProductStore;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

/// Default store currency.
const DEFAULT_CURRENCY: &str = "aud";

/// Payment gateway boundary.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a payment intent and returns its client secret.
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> OxcartResult<String>;
}

/// Gateway stand-in for development: fabricates a client secret and logs.
#[derive(Debug, Default)]
pub struct LoggingPaymentGateway;

#[async_trait]
impl PaymentGateway for LoggingPaymentGateway {
    async fn create_intent(&self, amount_minor: i64, currency: &str) -> OxcartResult<String> {
        let secret = format!("pi_{}_secret", Uuid::new_v4().simple());
        info!(amount_minor, currency, "Payment intent created (logging gateway)");
        Ok(secret)
    }
}

/// Payment service.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Computes the amount for the requested items and obtains a client
    /// secret from the gateway.
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> OxcartResult<PaymentIntentResponse>;
}

/// Payment service over the catalog store and a gateway.
pub struct PaymentServiceImpl<P> {
    products: Arc<P>,
    gateway: Arc<dyn PaymentGateway>,
}

impl<P: ProductStore> PaymentServiceImpl<P> {
    /// Creates a new payment service.
    pub fn new(products: Arc<P>, gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { products, gateway }
    }

    async fn compute_amount(&self, request: &PaymentIntentRequest) -> OxcartResult<Decimal> {
        let mut amount = Decimal::ZERO;

        for item in &request.items {
            let product_id = ProductId::parse(&item.product_id)?;
            let product = self
                .products
                .find_by_id(&product_id)
                .await?
                .ok_or_else(|| OxcartError::not_found("Product", &product_id))?;

            amount += product.effective_price() * Decimal::from(item.quantity);
        }

        Ok(amount)
    }
}

#[async_trait]
impl<P: ProductStore + 'static> PaymentService for PaymentServiceImpl<P> {
    async fn create_payment_intent(
        &self,
        request: PaymentIntentRequest,
    ) -> OxcartResult<PaymentIntentResponse> {
        debug!("Creating payment intent for {} items", request.items.len());

        request.validate_request()?;

        let amount = self.compute_amount(&request).await?;
        let amount_minor = (amount * Decimal::from(100))
            .trunc()
            .to_i64()
            .ok_or_else(|| OxcartError::internal("Payment amount out of range"))?;

        let currency = request
            .currency
            .as_deref()
            .unwrap_or(DEFAULT_CURRENCY)
            .to_lowercase();

        let client_secret = self.gateway.create_intent(amount_minor, &currency).await?;

        info!(amount_minor, currency = %currency, "Payment intent created");
        Ok(PaymentIntentResponse {
            client_secret,
            amount,
            amount_minor,
            currency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::PaymentItem;
    use crate::test_support::{test_product, MockProductStore};
    use std::sync::Mutex;

    const PRODUCT_A: &str = "65b2f1d04c6e7a0012345678";
    const PRODUCT_B: &str = "65b2f1d04c6e7a0012345679";

    struct RecordingGateway {
        calls: Mutex<Vec<(i64, String)>>,
    }

    #[async_trait]
    impl PaymentGateway for RecordingGateway {
        async fn create_intent(&self, amount_minor: i64, currency: &str) -> OxcartResult<String> {
            self.calls
                .lock()
                .unwrap()
                .push((amount_minor, currency.to_string()));
            Ok("pi_test_secret".to_string())
        }
    }

    fn fixture() -> (PaymentServiceImpl<MockProductStore>, Arc<RecordingGateway>) {
        let gateway = Arc::new(RecordingGateway {
            calls: Mutex::new(vec![]),
        });
        let mut discounted = test_product(PRODUCT_B, 2500, 10);
        discounted.compare_price = Some(Decimal::new(2000, 2));

        let service = PaymentServiceImpl::new(
            Arc::new(MockProductStore::with_products(vec![
                test_product(PRODUCT_A, 1000, 10),
                discounted,
            ])),
            gateway.clone(),
        );
        (service, gateway)
    }

    #[tokio::test]
    async fn test_amount_uses_effective_prices() {
        let (service, gateway) = fixture();

        // 2 x $10.00 + 1 x $20.00 (compare price wins over $25.00).
        let response = service
            .create_payment_intent(PaymentIntentRequest {
                items: vec![
                    PaymentItem {
                        product_id: PRODUCT_A.to_string(),
                        quantity: 2,
                    },
                    PaymentItem {
                        product_id: PRODUCT_B.to_string(),
                        quantity: 1,
                    },
                ],
                currency: None,
            })
            .await
            .unwrap();

        assert_eq!(response.amount, Decimal::new(4000, 2));
        assert_eq!(response.amount_minor, 4000);
        assert_eq!(response.currency, "aud");
        assert_eq!(response.client_secret, "pi_test_secret");

        let calls = gateway.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(4000, "aud".to_string())]);
    }

    #[tokio::test]
    async fn test_unknown_product_is_rejected() {
        let (service, _) = fixture();

        let result = service
            .create_payment_intent(PaymentIntentRequest {
                items: vec![PaymentItem {
                    product_id: "65b2f1d04c6e7a00ffffffff".to_string(),
                    quantity: 1,
                }],
                currency: None,
            })
            .await;
        assert!(matches!(result.unwrap_err(), OxcartError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_empty_item_list_is_rejected() {
        let (service, _) = fixture();

        let result = service
            .create_payment_intent(PaymentIntentRequest {
                items: vec![],
                currency: None,
            })
            .await;
        assert!(matches!(result.unwrap_err(), OxcartError::Validation(_)));
    }
}
