//! # Oxcart Queue
//!
//! Asynchronous message channels and their background consumers. Two named
//! channels exist: `email` (outbound mail) and `inventory` (stock
//! reconciliation after checkout). Delivery is at-least-once; consumers
//! must tolerate redelivery.

pub mod email;
pub mod error;
pub mod inventory;
pub mod memory;
pub mod message;
pub mod queue;
pub mod redis_queue;
pub mod worker;

pub use email::*;
pub use error::*;
pub use inventory::*;
pub use memory::*;
pub use message::*;
pub use queue::*;
pub use redis_queue::*;
pub use worker::*;
