use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::merchant::DisbursementFrequency;

/// One settlement for one merchant over one inclusive date window.
///
/// Daily rows summarize orders; weekly and monthly rows summarize prior
/// disbursement rows. Rows are append-only: corrections are computed at
/// creation time into `fee_amount_correction`, never as retroactive edits.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct MerchantDisbursement {
    pub id: Uuid,
    pub merchant_id: Uuid,
    pub frequency: DisbursementFrequency,
    pub orders_start_at: NaiveDate,
    pub orders_end_at: NaiveDate,
    pub fee_amount: Decimal,
    /// Signed minimum-monthly-fee top-up, zero for all but the first
    /// disbursement computed on the first day of a month.
    pub fee_amount_correction: Decimal,
    pub orders_sum_amount: Decimal,
    pub orders_total_entries: u64,
    pub created_at: DateTime<Utc>,
}
