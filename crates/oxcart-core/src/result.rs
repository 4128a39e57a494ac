//! Result type aliases for Oxcart.

use crate::OxcartError;

/// A specialized `Result` type for Oxcart operations.
pub type OxcartResult<T> = Result<T, OxcartError>;
