use clap::Parser;
use disbursements::application::ingestion::{IngestionPipeline, OrderDirs};
use disbursements::infrastructure::in_memory::InMemoryStorage;
use disbursements::interfaces::csv::merchant_reader::MerchantReader;
use miette::{IntoDiagnostic, Result};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::info;

/// Long-running ingestion job: polls a directory for order files and loads
/// them into storage until interrupted.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file with merchant seed data
    /// (reference;disbursement_frequency;minimum_monthly_fee)
    #[arg(long)]
    merchants: PathBuf,

    /// Root directory holding the waiting/, imported/ and failed/ folders
    #[arg(long, default_value = "orders")]
    orders_dir: PathBuf,

    /// Seconds to pause between polling cycles
    #[arg(long, default_value_t = 60)]
    job_pause: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let cli = Cli::parse();

    let store = InMemoryStorage::new();
    let seed = File::open(&cli.merchants).into_diagnostic()?;
    for merchant in MerchantReader::new(seed).merchants() {
        store.insert_merchant(merchant.into_diagnostic()?).await;
    }

    let dirs = OrderDirs::under(&cli.orders_dir);
    dirs.ensure().into_diagnostic()?;

    let pipeline = IngestionPipeline::new(Arc::new(store), dirs)
        .with_job_pause(Duration::from_secs(cli.job_pause));

    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("caught signal, terminating");
            let _ = tx.send(true);
        }
    });

    pipeline.run(rx).await;
    Ok(())
}
