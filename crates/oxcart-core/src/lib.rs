//! # Oxcart Core
//!
//! Core types, domain entities, and error definitions for the Oxcart
//! e-commerce backend. This crate provides the foundational abstractions
//! used across all layers: the error taxonomy, typed identifiers, and the
//! domain model for catalog products, cart lines, orders, and reviews.

pub mod domain;
pub mod error;
pub mod id;
pub mod result;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use id::*;
pub use result::*;
pub use validation::*;
