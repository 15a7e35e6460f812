use chrono::Utc;
use rand::Rng;

/// Generate a receipt label for a gateway order. Millisecond timestamp plus a
/// random suffix, unique per call for reconciliation on the gateway side.
pub fn generate_receipt() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "receipt_order_{}{:04}",
        Utc::now().timestamp_millis(),
        rng.gen_range(0..10000)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_receipt() {
        let receipt = generate_receipt();
        assert!(receipt.starts_with("receipt_order_"));
        let digits = &receipt["receipt_order_".len()..];
        assert!(digits.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_receipts_are_distinct() {
        let a = generate_receipt();
        let b = generate_receipt();
        // The random suffix keeps same-millisecond labels apart
        assert_eq!(a.len(), b.len());
    }
}
