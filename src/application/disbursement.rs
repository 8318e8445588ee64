use chrono::{Datelike, NaiveDate, Weekday};
use tracing::{error, info};

use crate::application::fees::FeeCalculator;
use crate::calendar;
use crate::domain::merchant::DisbursementFrequency;
use crate::domain::ports::StorageRef;
use crate::error::Result;

/// Point-in-time batch that rolls orders up into settlements for one
/// calendar day: daily always, weekly on Mondays, monthly on the first of
/// the month. Strictly sequential, no internal concurrency.
pub struct DisbursementPipeline {
    storage: StorageRef,
    fees: FeeCalculator,
}

impl DisbursementPipeline {
    pub fn new(storage: StorageRef) -> Self {
        Self {
            fees: FeeCalculator::new(storage.clone()),
            storage,
        }
    }

    /// Processes one calendar day.
    ///
    /// A daily-phase failure aborts the invocation before the rollups run.
    /// Weekly and monthly are independent of each other once the daily phase
    /// committed: each failure is logged, and the first one is returned.
    pub async fn run(&self, day: NaiveDate) -> Result<()> {
        info!("start processing orders from day {day}");

        if let Err(err) = self.daily_disbursements(day).await {
            error!("error creating daily disbursements: {err}");
            return Err(err);
        }

        let weekly = self.weekly_disbursements(day).await;
        if let Err(err) = &weekly {
            error!("error creating weekly disbursements: {err}");
        }
        let monthly = self.monthly_disbursements(day).await;
        if let Err(err) = &monthly {
            error!("error creating monthly disbursements: {err}");
        }

        info!("finish processing orders from day {day}");
        weekly.and(monthly)
    }

    /// Aggregates the day's un-disbursed orders into one daily settlement
    /// per merchant, then claims those orders in a single bulk update.
    ///
    /// TODO: wrap the aggregate-insert-mark sequence in a storage
    /// transaction; a crash between the inserts and the bulk update leaves
    /// orders aggregated but unclaimed.
    async fn daily_disbursements(&self, day: NaiveDate) -> Result<()> {
        let disbursements = self.storage.sum_orders(day).await?;
        let produced = !disbursements.is_empty();

        for mut disbursement in disbursements {
            disbursement.fee_amount_correction =
                self.fees.fee_correction(day, &disbursement).await?;
            self.storage.insert_disbursement(disbursement).await?;
        }

        if produced {
            self.storage.mark_orders_disbursed(day).await?;
        }
        Ok(())
    }

    /// Rolls the previous week's settlements up on Mondays, covering the
    /// previous Monday through the previous Sunday.
    async fn weekly_disbursements(&self, day: NaiveDate) -> Result<()> {
        if day.weekday() != Weekday::Mon {
            return Ok(());
        }

        let from = day - chrono::Days::new(7);
        let to = day - chrono::Days::new(1);
        let disbursements = self
            .storage
            .sum_disbursements(from, to, DisbursementFrequency::Weekly)
            .await?;
        for disbursement in disbursements {
            self.storage.insert_disbursement(disbursement).await?;
        }
        Ok(())
    }

    /// Rolls the previous full calendar month up on the first of the month.
    async fn monthly_disbursements(&self, day: NaiveDate) -> Result<()> {
        if day.day() != 1 {
            return Ok(());
        }

        let disbursements = self
            .storage
            .sum_disbursements(
                calendar::first_day_of_last_month(day),
                calendar::last_day_of_last_month(day),
                DisbursementFrequency::Monthly,
            )
            .await?;
        for disbursement in disbursements {
            self.storage.insert_disbursement(disbursement).await?;
        }
        Ok(())
    }
}
