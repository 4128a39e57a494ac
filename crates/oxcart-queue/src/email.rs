//! Outbound email consumer.

use crate::error::{QueueError, QueueResult};
use crate::message::{EmailMessage, QueuePayload, EMAIL_CHANNEL};
use crate::worker::MessageHandler;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Email transport boundary. The real transport is an external
/// collaborator; anything that can deliver a rendered message qualifies.
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Delivers one message.
    async fn send(&self, message: &EmailMessage) -> QueueResult<()>;
}

/// Transport that only logs, for development and tests.
#[derive(Debug, Default)]
pub struct LoggingEmailSender;

#[async_trait]
impl EmailSender for LoggingEmailSender {
    async fn send(&self, message: &EmailMessage) -> QueueResult<()> {
        info!(
            to = %message.to,
            subject = %message.subject,
            message_type = %message.message_type,
            "Email delivered (logging transport)"
        );
        Ok(())
    }
}

/// Handler for the `email` channel.
pub struct EmailHandler {
    sender: Arc<dyn EmailSender>,
}

impl EmailHandler {
    /// Creates an email handler over a transport.
    #[must_use]
    pub fn new(sender: Arc<dyn EmailSender>) -> Self {
        Self { sender }
    }
}

#[async_trait]
impl MessageHandler for EmailHandler {
    fn channel(&self) -> &'static str {
        EMAIL_CHANNEL
    }

    async fn handle(&self, payload: QueuePayload) -> QueueResult<()> {
        match payload {
            QueuePayload::Email(message) => {
                self.sender.send(&message).await?;
                info!(to = %message.to, "Sent email");
                Ok(())
            }
            other => Err(QueueError::Processing(format!(
                "Unexpected payload on email channel: {:?}",
                other
            ))),
        }
    }
}
