use chrono::{NaiveDate, Utc};
use clap::Parser;
use disbursements::application::disbursement::DisbursementPipeline;
use disbursements::application::ingestion::{IngestionPipeline, OrderDirs};
use disbursements::domain::ports::StorageRef;
use disbursements::infrastructure::in_memory::InMemoryStorage;
use disbursements::interfaces::csv::disbursement_writer::DisbursementWriter;
use disbursements::interfaces::csv::merchant_reader::MerchantReader;
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::error;

/// One-shot disbursement job: processes a day (or day range) and writes the
/// resulting settlement rows as CSV to stdout.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// CSV file with merchant seed data
    /// (reference;disbursement_frequency;minimum_monthly_fee)
    #[arg(long)]
    merchants: PathBuf,

    /// Optional orders directory to sweep once before processing
    #[arg(long)]
    orders_dir: Option<PathBuf>,

    /// First day to process (YYYY-MM-DD); defaults to yesterday in UTC
    #[arg(long)]
    from: Option<NaiveDate>,

    /// Last day to process, inclusive; defaults to --from
    #[arg(long)]
    to: Option<NaiveDate>,
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
    let storage: StorageRef = Arc::new(store.clone());

    if let Some(orders_dir) = &cli.orders_dir {
        let dirs = OrderDirs::under(orders_dir);
        dirs.ensure().into_diagnostic()?;
        IngestionPipeline::new(storage.clone(), dirs).sweep().await;
    }

    let yesterday = Utc::now()
        .date_naive()
        .pred_opt()
        .ok_or_else(|| miette!("date out of range"))?;
    let from = cli.from.unwrap_or(yesterday);
    let to = cli.to.unwrap_or(from);

    let pipeline = DisbursementPipeline::new(storage);
    let mut current = Some(from);
    while let Some(day) = current.filter(|d| *d <= to) {
        if let Err(err) = pipeline.run(day).await {
            error!("processing {day}: {err}");
        }
        current = day.succ_opt();
    }

    let stdout = io::stdout();
    let mut writer = DisbursementWriter::new(stdout.lock());
    writer
        .write_disbursements(store.disbursements().await)
        .into_diagnostic()?;

    Ok(())
}
