use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single payment order, priced at ingestion time.
///
/// The caller-supplied `id` is globally unique and acts as the natural
/// idempotency key: ingestion inserts an order at most once per id.
/// `fee_amount` is fixed when the order is built and never recomputed;
/// `disbursed` is the only field mutated afterwards, flipped to `true`
/// when a daily disbursement claims the order.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub id: String,
    pub merchant_id: Uuid,
    pub amount: Decimal,
    pub created_at: NaiveDate,
    pub disbursed: bool,
    pub fee_amount: Decimal,
}
