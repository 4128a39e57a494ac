//! Redis list-backed message queue.
//!
//! Each channel is a Redis list. `send` pushes onto the channel list;
//! `receive` atomically moves entries onto a per-channel processing list
//! (RPOPLPUSH), which is what gives the receive/delete receipt contract:
//! `delete` removes the entry from the processing list, and anything still
//! on it after a crash is pushed back by `recover` at startup.

use crate::error::QueueResult;
use crate::message::{QueueMessage, QueuePayload};
use crate::queue::{Delivery, MessageQueue, Receipt};
use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use tracing::{debug, error, info};

/// Redis-backed message queue.
pub struct RedisMessageQueue {
    pool: Pool,
    prefix: String,
}

impl RedisMessageQueue {
    /// Creates a queue over a Redis pool with the given key prefix.
    #[must_use]
    pub fn new(pool: Pool, prefix: impl Into<String>) -> Self {
        Self {
            pool,
            prefix: prefix.into(),
        }
    }

    fn channel_key(&self, channel: &str) -> String {
        format!("{}:{}", self.prefix, channel)
    }

    fn processing_key(&self, channel: &str) -> String {
        format!("{}:{}:processing", self.prefix, channel)
    }

    async fn conn(&self) -> QueueResult<deadpool_redis::Connection> {
        Ok(self.pool.get().await?)
    }
}

#[async_trait]
impl MessageQueue for RedisMessageQueue {
    async fn send(&self, payload: &QueuePayload) -> QueueResult<()> {
        let channel = payload.channel();
        let message = QueueMessage::wrap(payload)?;
        let wire = message.to_wire()?;

        let mut conn = self.conn().await?;
        conn.lpush::<_, _, ()>(self.channel_key(channel), &wire)
            .await?;

        debug!(
            message_id = %message.id,
            channel = %channel,
            "Enqueued message"
        );
        Ok(())
    }

    async fn receive(&self, channel: &str, max: usize) -> QueueResult<Vec<Delivery>> {
        let mut conn = self.conn().await?;
        let channel_key = self.channel_key(channel);
        let processing_key = self.processing_key(channel);

        let mut deliveries = Vec::new();

        for _ in 0..max {
            let raw: Option<String> = conn.rpoplpush(&channel_key, &processing_key).await?;
            let Some(raw) = raw else {
                break;
            };

            match QueueMessage::from_wire(&raw) {
                Ok(message) => {
                    debug!(message_id = %message.id, channel = %channel, "Received message");
                    deliveries.push(Delivery {
                        message,
                        receipt: Receipt(raw),
                    });
                }
                Err(e) => {
                    // A poison entry would otherwise be redelivered forever.
                    error!(channel = %channel, error = %e, "Dropping undecodable message");
                    conn.lrem::<_, _, ()>(&processing_key, 1, &raw).await?;
                }
            }
        }

        Ok(deliveries)
    }

    async fn delete(&self, channel: &str, receipt: &Receipt) -> QueueResult<()> {
        let mut conn = self.conn().await?;
        let removed: i64 = conn
            .lrem(self.processing_key(channel), 1, &receipt.0)
            .await?;

        debug!(channel = %channel, removed = removed, "Deleted message");
        Ok(())
    }

    async fn recover(&self, channel: &str) -> QueueResult<u64> {
        let mut conn = self.conn().await?;
        let channel_key = self.channel_key(channel);
        let processing_key = self.processing_key(channel);

        let mut moved = 0u64;
        loop {
            let raw: Option<String> = conn.rpoplpush(&processing_key, &channel_key).await?;
            if raw.is_none() {
                break;
            }
            moved += 1;
        }

        if moved > 0 {
            info!(channel = %channel, count = moved, "Recovered in-flight messages for redelivery");
        }

        Ok(moved)
    }

    async fn len(&self, channel: &str) -> QueueResult<u64> {
        let mut conn = self.conn().await?;
        let len: u64 = conn.llen(self.channel_key(channel)).await?;
        Ok(len)
    }
}

impl std::fmt::Debug for RedisMessageQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisMessageQueue")
            .field("prefix", &self.prefix)
            .finish()
    }
}
