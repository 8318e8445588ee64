use std::path::Path;

pub const ORDER_HEADER: &str = "id;merchant_reference;amount;created_at";

/// Writes a merchant seed file accepted by both binaries and the
/// `MerchantReader`.
pub fn write_merchants(path: &Path, merchants: &[(&str, &str, &str)]) {
    let mut lines = vec!["reference;disbursement_frequency;minimum_monthly_fee".to_string()];
    for (reference, frequency, minimum) in merchants {
        lines.push(format!("{reference};{frequency};{minimum}"));
    }
    std::fs::write(path, lines.join("\n")).unwrap();
}

/// Writes an order file: rows are (id, merchant_reference, amount, date).
pub fn write_orders(path: &Path, rows: &[(&str, &str, &str, &str)]) {
    let mut lines = vec![ORDER_HEADER.to_string()];
    for (id, reference, amount, date) in rows {
        lines.push(format!("{id};{reference};{amount};{date}"));
    }
    std::fs::write(path, lines.join("\n")).unwrap();
}
