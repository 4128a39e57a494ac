//! # Oxcart Service
//!
//! Business logic service layer for Oxcart: the distributed cache layer and
//! the cart, order, catalog, review, user-info, and payment services.

pub mod cache;
pub mod cart_service;
pub mod dto;
pub mod order_number;
pub mod order_service;
pub mod payment;
pub mod product_service;
pub mod review_service;
pub mod user_info_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use cache::*;
pub use cart_service::*;
pub use dto::*;
pub use order_number::*;
pub use order_service::*;
pub use payment::*;
pub use product_service::*;
pub use review_service::*;
pub use user_info_service::*;
