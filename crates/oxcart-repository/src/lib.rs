//! # Oxcart Repository
//!
//! Persistence layer: the relational store (MySQL via sqlx) holds users,
//! orders, and cart lines; the document store (MongoDB) holds the product
//! catalog and reviews. Repository methods take an explicit connection or
//! transaction handle so that callers own transaction boundaries.

pub mod mongo;
pub mod mysql;
pub mod pool;
pub mod traits;

pub use mongo::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
