//! In-memory message queue for tests.

use crate::error::QueueResult;
use crate::message::{QueueMessage, QueuePayload};
use crate::queue::{Delivery, MessageQueue, Receipt};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use tracing::error;

/// In-memory queue mirroring the Redis list semantics: receive moves
/// entries to a processing list, delete removes them from it, recover
/// pushes stranded entries back onto the channel.
#[derive(Default)]
pub struct InMemoryMessageQueue {
    channels: Mutex<HashMap<String, VecDeque<String>>>,
    processing: Mutex<HashMap<String, Vec<String>>>,
}

impl InMemoryMessageQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of messages sitting on the processing list.
    #[must_use]
    pub fn processing_len(&self, channel: &str) -> usize {
        self.processing
            .lock()
            .unwrap()
            .get(channel)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl MessageQueue for InMemoryMessageQueue {
    async fn send(&self, payload: &QueuePayload) -> QueueResult<()> {
        let message = QueueMessage::wrap(payload)?;
        let wire = message.to_wire()?;

        self.channels
            .lock()
            .unwrap()
            .entry(payload.channel().to_string())
            .or_default()
            .push_back(wire);

        Ok(())
    }

    async fn receive(&self, channel: &str, max: usize) -> QueueResult<Vec<Delivery>> {
        let mut deliveries = Vec::new();

        for _ in 0..max {
            let raw = {
                let mut channels = self.channels.lock().unwrap();
                channels.get_mut(channel).and_then(VecDeque::pop_front)
            };
            let Some(raw) = raw else {
                break;
            };

            self.processing
                .lock()
                .unwrap()
                .entry(channel.to_string())
                .or_default()
                .push(raw.clone());

            match QueueMessage::from_wire(&raw) {
                Ok(message) => deliveries.push(Delivery {
                    message,
                    receipt: Receipt(raw),
                }),
                Err(e) => {
                    error!(channel = %channel, error = %e, "Dropping undecodable message");
                    if let Some(list) = self.processing.lock().unwrap().get_mut(channel) {
                        list.retain(|entry| entry != &raw);
                    }
                }
            }
        }

        Ok(deliveries)
    }

    async fn delete(&self, channel: &str, receipt: &Receipt) -> QueueResult<()> {
        if let Some(list) = self.processing.lock().unwrap().get_mut(channel) {
            if let Some(pos) = list.iter().position(|entry| entry == &receipt.0) {
                list.remove(pos);
            }
        }
        Ok(())
    }

    async fn recover(&self, channel: &str) -> QueueResult<u64> {
        let stranded: Vec<String> = self
            .processing
            .lock()
            .unwrap()
            .remove(channel)
            .unwrap_or_default();

        let moved = stranded.len() as u64;
        let mut channels = self.channels.lock().unwrap();
        let queue = channels.entry(channel.to_string()).or_default();
        for entry in stranded {
            queue.push_back(entry);
        }

        Ok(moved)
    }

    async fn len(&self, channel: &str) -> QueueResult<u64> {
        Ok(self
            .channels
            .lock()
            .unwrap()
            .get(channel)
            .map_or(0, VecDeque::len) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{EmailMessage, INVENTORY_CHANNEL, StockAdjustmentBatch};

    fn email_payload() -> QueuePayload {
        QueuePayload::Email(EmailMessage {
            to: "user@example.com".to_string(),
            subject: "s".to_string(),
            body: "b".to_string(),
            message_type: "orders".to_string(),
        })
    }

    #[tokio::test]
    async fn test_send_receive_delete() {
        let queue = InMemoryMessageQueue::new();
        queue.send(&email_payload()).await.unwrap();
        assert_eq!(queue.len("email").await.unwrap(), 1);

        let deliveries = queue.receive("email", 32).await.unwrap();
        assert_eq!(deliveries.len(), 1);
        assert_eq!(queue.len("email").await.unwrap(), 0);
        assert_eq!(queue.processing_len("email"), 1);

        queue
            .delete("email", &deliveries[0].receipt)
            .await
            .unwrap();
        assert_eq!(queue.processing_len("email"), 0);
    }

    #[tokio::test]
    async fn test_undeleted_message_is_recoverable() {
        let queue = InMemoryMessageQueue::new();
        queue
            .send(&QueuePayload::StockAdjustment(StockAdjustmentBatch {
                order_number: "ORD-1".to_string(),
                lines: vec![],
            }))
            .await
            .unwrap();

        // Consumer receives but crashes before deleting.
        let _ = queue.receive(INVENTORY_CHANNEL, 32).await.unwrap();
        assert_eq!(queue.len(INVENTORY_CHANNEL).await.unwrap(), 0);

        // Next startup recovers the stranded message for redelivery.
        assert_eq!(queue.recover(INVENTORY_CHANNEL).await.unwrap(), 1);
        assert_eq!(queue.len(INVENTORY_CHANNEL).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_receive_respects_max() {
        let queue = InMemoryMessageQueue::new();
        for _ in 0..5 {
            queue.send(&email_payload()).await.unwrap();
        }

        let deliveries = queue.receive("email", 3).await.unwrap();
        assert_eq!(deliveries.len(), 3);
        assert_eq!(queue.len("email").await.unwrap(), 2);
    }
}
