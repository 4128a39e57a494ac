//! Payment intent DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// One item in a payment intent request.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentItem {
    #[validate(length(equal = 24, message = "Invalid product ID format"))]
    pub product_id: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

/// Request to create a payment intent. The amount is always recomputed
/// server-side from catalog prices; client-supplied prices are not trusted.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PaymentIntentRequest {
    #[validate(length(min = 1, message = "Payment must cover at least one item"), nested)]
    pub items: Vec<PaymentItem>,

    /// ISO currency code; defaults to the configured store currency.
    pub currency: Option<String>,
}

/// Payment intent response DTO.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentIntentResponse {
    /// Opaque client secret from the gateway.
    pub client_secret: String,
    /// Computed amount in major units.
    pub amount: Decimal,
    /// Amount sent to the gateway, in minor units.
    pub amount_minor: i64,
    /// Currency code.
    pub currency: String,
}
