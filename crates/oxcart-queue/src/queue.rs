//! Message queue abstraction.

use crate::error::QueueResult;
use crate::message::{QueueMessage, QueuePayload};
use async_trait::async_trait;

/// Receipt proving a message was received; required to delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt(pub(crate) String);

/// A received message together with its deletion receipt.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub message: QueueMessage,
    pub receipt: Receipt,
}

/// Named-channel message queue with at-least-once delivery.
///
/// A received message stays owned by the consumer until it is deleted with
/// its receipt; a consumer crash before deletion leaves the message for
/// redelivery (via [`recover`](Self::recover) on the next startup). There
/// is no ordering guarantee between channels.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Sends a payload to its channel.
    async fn send(&self, payload: &QueuePayload) -> QueueResult<()>;

    /// Receives up to `max` messages from a channel. Messages that fail to
    /// parse are dropped with an error log, not returned.
    async fn receive(&self, channel: &str, max: usize) -> QueueResult<Vec<Delivery>>;

    /// Deletes a processed message by its receipt. Deleting an unknown
    /// receipt is a no-op.
    async fn delete(&self, channel: &str, receipt: &Receipt) -> QueueResult<()>;

    /// Returns messages stranded mid-processing (e.g. by a crashed
    /// consumer) to their channel for redelivery. Returns the count moved.
    async fn recover(&self, channel: &str) -> QueueResult<u64>;

    /// Number of messages waiting on a channel.
    async fn len(&self, channel: &str) -> QueueResult<u64>;
}
