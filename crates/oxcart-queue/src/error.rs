//! Queue error types.

use thiserror::Error;

/// Result type for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Queue-related errors.
#[derive(Debug, Error)]
pub enum QueueError {
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Payload is not valid base64.
    #[error("Payload encoding error: {0}")]
    Encoding(#[from] base64::DecodeError),

    /// Redis error.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Redis pool error.
    #[error("Redis pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    /// Message processing failed.
    #[error("Processing failed: {0}")]
    Processing(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<oxcart_core::OxcartError> for QueueError {
    fn from(err: oxcart_core::OxcartError) -> Self {
        QueueError::Processing(err.to_string())
    }
}
