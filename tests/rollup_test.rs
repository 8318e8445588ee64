//! Full-month scenario driven through the public pipeline API: files are
//! ingested, then every day of a range is processed, and the Monday/first-of-
//! month rollups plus the minimum-fee correction are checked on the way.

use chrono::NaiveDate;
use disbursements::application::disbursement::DisbursementPipeline;
use disbursements::application::ingestion::{IngestionPipeline, OrderDirs};
use disbursements::domain::merchant::DisbursementFrequency;
use disbursements::domain::ports::{Storage, StorageRef};
use disbursements::infrastructure::in_memory::InMemoryStorage;
use disbursements::interfaces::csv::merchant_reader::MerchantReader;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tempfile::tempdir;

mod common;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[tokio::test]
async fn test_month_of_orders_rolls_up_into_weekly_and_monthly_rows() {
    let dir = tempdir().unwrap();
    let seed_path = dir.path().join("merchants.csv");
    common::write_merchants(&seed_path, &[("shop_a", "weekly", "10.00")]);

    let store = InMemoryStorage::new();
    let seed = std::fs::File::open(&seed_path).unwrap();
    for merchant in MerchantReader::new(seed).merchants() {
        store.insert_merchant(merchant.unwrap()).await;
    }
    let storage: StorageRef = Arc::new(store.clone());

    let dirs = OrderDirs::under(dir.path());
    dirs.ensure().unwrap();
    common::write_orders(
        &dirs.waiting.join("february.csv"),
        &[
            // Fees: 100.00 -> 0.95, 30.00 -> 0.30, 500.00 -> 4.25
            ("o1", "shop_a", "100.00", "2023-02-27"),
            ("o2", "shop_a", "30.00", "2023-02-28"),
            ("o3", "shop_a", "500.00", "2023-03-01"),
        ],
    );
    IngestionPipeline::new(storage.clone(), dirs).sweep().await;
    assert_eq!(store.order_count().await, 3);

    // Process every day from the first order through the Monday after.
    let pipeline = DisbursementPipeline::new(storage);
    let mut day = date(2023, 2, 27);
    while day <= date(2023, 3, 6) {
        pipeline.run(day).await.unwrap();
        day = day.succ_opt().unwrap();
    }

    let rows = store.disbursements().await;

    let daily: Vec<_> = rows
        .iter()
        .filter(|r| r.frequency == DisbursementFrequency::Daily)
        .collect();
    assert_eq!(daily.len(), 3);

    // Monthly rollup on 2023-03-01 covers the two February days.
    let monthly: Vec<_> = rows
        .iter()
        .filter(|r| r.frequency == DisbursementFrequency::Monthly)
        .collect();
    assert_eq!(monthly.len(), 1);
    assert_eq!(monthly[0].orders_start_at, date(2023, 2, 1));
    assert_eq!(monthly[0].orders_end_at, date(2023, 2, 28));
    assert_eq!(monthly[0].fee_amount, dec!(1.25));
    assert_eq!(monthly[0].orders_sum_amount, dec!(130.00));
    assert_eq!(monthly[0].orders_total_entries, 2);

    // Weekly rollup on Monday 2023-03-06 covers Mon 02-27 .. Sun 03-05:
    // the three daily rows and the monthly row stamped [02-01, 02-28] do not
    // all fit; only windows inside [02-27, 03-05] count.
    let weekly: Vec<_> = rows
        .iter()
        .filter(|r| r.frequency == DisbursementFrequency::Weekly)
        .collect();
    assert_eq!(weekly.len(), 1);
    assert_eq!(weekly[0].orders_start_at, date(2023, 2, 27));
    assert_eq!(weekly[0].orders_end_at, date(2023, 3, 5));
    assert_eq!(weekly[0].fee_amount, dec!(5.50));
    assert_eq!(weekly[0].orders_total_entries, 3);

    // 2023-03-01 was the first disbursement of March and February's fees
    // (1.25) fell short of the 10.00 minimum: 8.75 top-up on that daily row.
    let first_of_march = daily
        .iter()
        .find(|r| r.orders_start_at == date(2023, 3, 1))
        .unwrap();
    assert_eq!(first_of_march.fee_amount, dec!(4.25));
    assert_eq!(first_of_march.fee_amount_correction, dec!(8.75));

    // Every order was claimed by a daily disbursement.
    for id in ["o1", "o2", "o3"] {
        assert!(store.order(id).await.unwrap().unwrap().disbursed);
    }
}
