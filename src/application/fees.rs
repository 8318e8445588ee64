use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::calendar;
use crate::domain::disbursement::MerchantDisbursement;
use crate::domain::merchant::DisbursementFrequency;
use crate::domain::ports::StorageRef;
use crate::error::{DisbursementError, Result};

/// Fee rate for orders strictly below 50.00.
const SMALL_ORDER_RATE: Decimal = dec!(0.01);
/// Fee rate for orders between 50.00 and 300.00, both inclusive.
const MEDIUM_ORDER_RATE: Decimal = dec!(0.0095);
/// Fee rate for orders above 300.00.
const LARGE_ORDER_RATE: Decimal = dec!(0.0085);

const MEDIUM_ORDER_THRESHOLD: Decimal = dec!(50.00);
const LARGE_ORDER_THRESHOLD: Decimal = dec!(300.00);

/// Prices orders and computes minimum-monthly-fee corrections.
pub struct FeeCalculator {
    storage: StorageRef,
}

impl FeeCalculator {
    pub fn new(storage: StorageRef) -> Self {
        Self { storage }
    }

    /// Applies the tiered fee schedule to an order amount.
    ///
    /// Pure and total: any amount falls into exactly one tier, and the result
    /// is rounded to two decimal places, midpoint away from zero.
    pub fn fee_amount(amount: Decimal) -> Decimal {
        let rate = if amount < MEDIUM_ORDER_THRESHOLD {
            SMALL_ORDER_RATE
        } else if amount <= LARGE_ORDER_THRESHOLD {
            MEDIUM_ORDER_RATE
        } else {
            LARGE_ORDER_RATE
        };
        (amount * rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Computes the minimum-monthly-fee top-up for a disbursement.
    ///
    /// Only the first disbursement computed on the first day of a month is
    /// ever corrected; any other day returns zero without touching storage.
    /// Merchants with no disbursements in the previous full calendar month
    /// are never corrected retroactively.
    pub async fn fee_correction(
        &self,
        day: NaiveDate,
        disbursement: &MerchantDisbursement,
    ) -> Result<Decimal> {
        if day.day() != 1 {
            return Ok(Decimal::ZERO);
        }

        let last_month = self
            .storage
            .sum_disbursements_for_merchant(
                disbursement.merchant_id,
                calendar::first_day_of_last_month(day),
                calendar::last_day_of_last_month(day),
                DisbursementFrequency::Monthly,
            )
            .await?;
        let Some(last_month) = last_month else {
            return Ok(Decimal::ZERO);
        };

        let merchant = self
            .storage
            .merchant(disbursement.merchant_id)
            .await?
            .ok_or(DisbursementError::UnknownMerchantId(
                disbursement.merchant_id,
            ))?;

        if merchant.minimum_monthly_fee > last_month.fee_amount {
            Ok(merchant.minimum_monthly_fee - last_month.fee_amount)
        } else {
            Ok(Decimal::ZERO)
        }
    }
}
