use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

mod common;

#[test]
fn test_processor_end_to_end() {
    let dir = tempdir().unwrap();
    let merchants = dir.path().join("merchants.csv");
    common::write_merchants(&merchants, &[("shop_a", "daily", "0")]);

    let orders_dir = dir.path().join("orders");
    std::fs::create_dir_all(orders_dir.join("waiting")).unwrap();
    common::write_orders(
        &orders_dir.join("waiting").join("orders.csv"),
        &[("o1", "shop_a", "100.00", "2023-03-15")],
    );

    let mut cmd = Command::new(cargo_bin!("processor"));
    cmd.arg("--merchants")
        .arg(&merchants)
        .arg("--orders-dir")
        .arg(&orders_dir)
        .arg("--from")
        .arg("2023-03-15");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "id;merchant_id;frequency;orders_start_at;orders_end_at",
        ))
        .stdout(predicate::str::contains("daily"))
        .stdout(predicate::str::contains(";2023-03-15;2023-03-15;0.95;"));

    // The order file was routed out of waiting into imported.
    assert!(orders_dir.join("imported").join("orders.csv").exists());
    assert!(!orders_dir.join("waiting").join("orders.csv").exists());
}

#[test]
fn test_processor_routes_bad_files_to_failed() {
    let dir = tempdir().unwrap();
    let merchants = dir.path().join("merchants.csv");
    common::write_merchants(&merchants, &[("shop_a", "daily", "0")]);

    let orders_dir = dir.path().join("orders");
    std::fs::create_dir_all(orders_dir.join("waiting")).unwrap();
    common::write_orders(
        &orders_dir.join("waiting").join("orders.csv"),
        &[("o1", "ghost_shop", "100.00", "2023-03-15")],
    );

    let mut cmd = Command::new(cargo_bin!("processor"));
    cmd.arg("--merchants")
        .arg(&merchants)
        .arg("--orders-dir")
        .arg(&orders_dir)
        .arg("--from")
        .arg("2023-03-15");

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("ghost_shop"));

    assert!(orders_dir.join("failed").join("orders.csv").exists());
}

#[test]
fn test_processor_rejects_missing_merchants_file() {
    let mut cmd = Command::new(cargo_bin!("processor"));
    cmd.arg("--merchants").arg("does-not-exist.csv");
    cmd.assert().failure();
}
