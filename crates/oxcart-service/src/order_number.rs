//! Order number generation.

use chrono::Utc;
use uuid::Uuid;

/// Generates a human-legible order number: a UTC timestamp plus a random
/// hex suffix. Uniqueness is the guarantee; strict ordering across
/// concurrent checkouts is not.
#[must_use]
pub fn generate_order_number() -> String {
    let timestamp = Utc::now().format("%Y%m%d%H%M%S");
    let unique = Uuid::new_v4().simple().to_string();
    format!("ORD-{}-{}", timestamp, &unique[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format() {
        let number = generate_order_number();
        assert!(number.starts_with("ORD-"));
        // ORD- + 14 digit timestamp + - + 6 hex chars
        assert_eq!(number.len(), 4 + 14 + 1 + 6);
    }

    #[test]
    fn test_uniqueness() {
        let a = generate_order_number();
        let b = generate_order_number();
        assert_ne!(a, b);
    }
}
