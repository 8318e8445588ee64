use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How often a merchant gets paid out.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum DisbursementFrequency {
    Daily,
    Weekly,
    Monthly,
}

/// A merchant as onboarded by an external process.
///
/// Merchants are immutable during a processing run; the engine only ever
/// reads them to resolve order references and minimum-fee contracts.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Merchant {
    pub id: Uuid,
    /// Unique reference used in order files to identify the merchant.
    pub reference: String,
    pub disbursement_frequency: DisbursementFrequency,
    /// Contracted minimum fee per calendar month, non-negative.
    pub minimum_monthly_fee: Decimal,
}
