//! Background consumer loop shared by the channel workers.

use crate::error::QueueResult;
use crate::message::QueuePayload;
use crate::queue::MessageQueue;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};

/// Handler for one channel's messages.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    /// The channel this handler consumes.
    fn channel(&self) -> &'static str;

    /// Processes one message's payload. An error leaves the message
    /// undeleted for redelivery.
    async fn handle(&self, payload: QueuePayload) -> QueueResult<()>;
}

/// Configuration for a channel worker.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Seconds between polls of an idle channel.
    pub poll_interval: Duration,
    /// Maximum messages per receive.
    pub batch_size: usize,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(10),
            batch_size: 32,
        }
    }
}

/// Long-lived poll loop driving one [`MessageHandler`].
///
/// Each message is deleted only after its handler returns success, so a
/// crash mid-processing leads to redelivery of that message (at-least-once
/// delivery; handlers must tolerate duplicates). The worker runs on its own
/// task with its own store handles, fully decoupled from request handling.
pub struct ChannelWorker {
    queue: Arc<dyn MessageQueue>,
    handler: Arc<dyn MessageHandler>,
    config: WorkerConfig,
    shutdown_tx: broadcast::Sender<()>,
}

impl ChannelWorker {
    /// Creates a worker for the handler's channel.
    #[must_use]
    pub fn new(
        queue: Arc<dyn MessageQueue>,
        handler: Arc<dyn MessageHandler>,
        config: WorkerConfig,
    ) -> Self {
        let (shutdown_tx, _) = broadcast::channel(1);
        Self {
            queue,
            handler,
            config,
            shutdown_tx,
        }
    }

    /// Signals the run loop to stop after the current batch.
    pub fn stop(&self) {
        let _ = self.shutdown_tx.send(());
    }

    /// Runs the poll loop until [`stop`](Self::stop) is called.
    pub async fn run(&self) {
        let channel = self.handler.channel();
        info!(channel = %channel, "Starting channel worker");

        // Reclaim messages stranded by a previous crash before polling.
        if let Err(e) = self.queue.recover(channel).await {
            error!(channel = %channel, error = %e, "Failed to recover in-flight messages");
        }

        let mut shutdown_rx = self.shutdown_tx.subscribe();

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    info!(channel = %channel, "Channel worker received shutdown signal");
                    break;
                }
                _ = tokio::time::sleep(self.config.poll_interval) => {
                    self.drain_once().await;
                }
            }
        }

        info!(channel = %channel, "Channel worker stopped");
    }

    /// Receives and processes one batch. Public so tests can drive the
    /// worker without the timing loop.
    pub async fn drain_once(&self) {
        let channel = self.handler.channel();

        let deliveries = match self.queue.receive(channel, self.config.batch_size).await {
            Ok(deliveries) => deliveries,
            Err(e) => {
                error!(channel = %channel, error = %e, "Failed to receive messages");
                return;
            }
        };

        if deliveries.is_empty() {
            debug!(channel = %channel, "No messages");
            return;
        }

        info!(channel = %channel, count = deliveries.len(), "Processing messages");

        for delivery in deliveries {
            let message_id = delivery.message.id.clone();

            let payload = match delivery.message.decode() {
                Ok(payload) => payload,
                Err(e) => {
                    error!(message_id = %message_id, error = %e, "Undecodable payload, deleting");
                    let _ = self.queue.delete(channel, &delivery.receipt).await;
                    continue;
                }
            };

            match self.handler.handle(payload).await {
                Ok(()) => {
                    if let Err(e) = self.queue.delete(channel, &delivery.receipt).await {
                        error!(message_id = %message_id, error = %e, "Failed to delete processed message");
                    }
                }
                Err(e) => {
                    // Leave the message for redelivery.
                    warn!(message_id = %message_id, error = %e, "Message processing failed");
                }
            }
        }
    }
}
