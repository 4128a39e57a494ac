//! Message envelope and payload schemas.

use crate::error::QueueResult;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Name of the outbound email channel.
pub const EMAIL_CHANNEL: &str = "email";

/// Name of the inventory reconciliation channel.
pub const INVENTORY_CHANNEL: &str = "inventory";

/// Outbound email message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
    /// Sender category (orders, receipts, ...), used for the from-address.
    pub message_type: String,
}

/// One line of a stock adjustment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustmentLine {
    /// Catalog product reference, in textual object-id form. Parsed by the
    /// consumer; unparseable references are skipped there, not here.
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
}

/// A batch of stock adjustments from one committed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockAdjustmentBatch {
    pub order_number: String,
    pub lines: Vec<StockAdjustmentLine>,
}

/// Typed payload carried by a queued message. One schema per message type,
/// discriminated by a `type` tag on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum QueuePayload {
    Email(EmailMessage),
    StockAdjustment(StockAdjustmentBatch),
}

impl QueuePayload {
    /// The channel this payload belongs on.
    #[must_use]
    pub const fn channel(&self) -> &'static str {
        match self {
            Self::Email(_) => EMAIL_CHANNEL,
            Self::StockAdjustment(_) => INVENTORY_CHANNEL,
        }
    }
}

/// Wire envelope: identity plus the base64(JSON) payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueueMessage {
    /// Message identity, assigned at send time.
    pub id: String,

    /// Base64-encoded JSON payload.
    pub payload: String,

    /// Enqueue timestamp.
    pub enqueued_at: DateTime<Utc>,
}

impl QueueMessage {
    /// Wraps a payload into a new envelope.
    pub fn wrap(payload: &QueuePayload) -> QueueResult<Self> {
        let json = serde_json::to_string(payload)?;
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            payload: BASE64.encode(json.as_bytes()),
            enqueued_at: Utc::now(),
        })
    }

    /// Decodes the payload.
    pub fn decode(&self) -> QueueResult<QueuePayload> {
        let bytes = BASE64.decode(&self.payload)?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Serializes the envelope for the wire.
    pub fn to_wire(&self) -> QueueResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses an envelope off the wire.
    pub fn from_wire(raw: &str) -> QueueResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_channels() {
        let email = QueuePayload::Email(EmailMessage {
            to: "a@b.c".to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
            message_type: "orders".to_string(),
        });
        assert_eq!(email.channel(), "email");

        let stock = QueuePayload::StockAdjustment(StockAdjustmentBatch {
            order_number: "ORD-1".to_string(),
            lines: vec![],
        });
        assert_eq!(stock.channel(), "inventory");
    }

    #[test]
    fn test_envelope_round_trip() {
        let payload = QueuePayload::StockAdjustment(StockAdjustmentBatch {
            order_number: "ORD-20250101000000-abc123".to_string(),
            lines: vec![StockAdjustmentLine {
                product_id: "65b2f1d04c6e7a0012345678".to_string(),
                product_name: "Widget".to_string(),
                quantity: 4,
            }],
        });

        let message = QueueMessage::wrap(&payload).unwrap();
        let wire = message.to_wire().unwrap();
        let parsed = QueueMessage::from_wire(&wire).unwrap();

        assert_eq!(parsed.id, message.id);
        assert_eq!(parsed.decode().unwrap(), payload);
    }

    #[test]
    fn test_payload_is_base64_opaque() {
        let payload = QueuePayload::Email(EmailMessage {
            to: "a@b.c".to_string(),
            subject: "Order confirmed".to_string(),
            body: "Thanks".to_string(),
            message_type: "orders".to_string(),
        });

        let message = QueueMessage::wrap(&payload).unwrap();
        assert!(!message.payload.contains("Order confirmed"));
    }

    #[test]
    fn test_tag_discriminates_message_types() {
        let payload = QueuePayload::StockAdjustment(StockAdjustmentBatch {
            order_number: "ORD-1".to_string(),
            lines: vec![],
        });
        let json = serde_json::to_string(&payload).unwrap();
        assert!(json.contains("\"type\":\"stock_adjustment\""));
    }
}
