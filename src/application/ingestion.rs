use std::fs::File;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, error, info};

use crate::application::fees::FeeCalculator;
use crate::domain::order::Order;
use crate::domain::ports::StorageRef;
use crate::error::{DisbursementError, Result};
use crate::interfaces::csv::order_reader::{OrderReader, OrderRow};

/// Interval between polling cycles unless overridden.
pub const DEFAULT_JOB_PAUSE: Duration = Duration::from_secs(60);

/// The three flat directories an order file moves through:
/// `waiting` → `imported` on success, `waiting` → `failed` on error.
#[derive(Debug, Clone)]
pub struct OrderDirs {
    pub waiting: PathBuf,
    pub imported: PathBuf,
    pub failed: PathBuf,
}

impl OrderDirs {
    pub fn under(root: &Path) -> Self {
        Self {
            waiting: root.join("waiting"),
            imported: root.join("imported"),
            failed: root.join("failed"),
        }
    }

    pub fn ensure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.waiting)?;
        std::fs::create_dir_all(&self.imported)?;
        std::fs::create_dir_all(&self.failed)?;
        Ok(())
    }
}

/// Long-lived polling loop that turns order files into persisted,
/// fee-priced orders.
///
/// Files are processed one at a time, end to end; the only suspension points
/// are storage calls and the sleep between cycles. Import is row-at-a-time:
/// a failing row aborts the rest of its file, but rows inserted before it
/// stay committed.
pub struct IngestionPipeline {
    storage: StorageRef,
    dirs: OrderDirs,
    job_pause: Duration,
}

impl IngestionPipeline {
    pub fn new(storage: StorageRef, dirs: OrderDirs) -> Self {
        Self {
            storage,
            dirs,
            job_pause: DEFAULT_JOB_PAUSE,
        }
    }

    pub fn with_job_pause(mut self, pause: Duration) -> Self {
        self.job_pause = pause;
        self
    }

    /// Runs polling cycles until `shutdown` flips to `true`.
    ///
    /// The signal is checked once per iteration; an in-flight sweep always
    /// completes before the loop exits.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!("starting order ingestion loop");
        loop {
            if *shutdown.borrow() {
                info!("stopping order ingestion loop");
                return;
            }

            self.sweep().await;

            tokio::select! {
                _ = tokio::time::sleep(self.job_pause) => {}
                _ = shutdown.changed() => {}
            }
        }
    }

    /// One polling cycle: every regular file in `waiting` is imported and
    /// routed to `imported` or `failed`, exactly one move per file.
    pub async fn sweep(&self) {
        let files = match self.waiting_files() {
            Ok(files) => files,
            Err(err) => {
                error!("scanning {}: {err}", self.dirs.waiting.display());
                return;
            }
        };
        info!("files to process: {}", files.len());

        for file in files {
            let target = match self.import_file(&file).await {
                Ok(()) => &self.dirs.imported,
                Err(err) => {
                    error!("error importing orders from {}: {err}", file.display());
                    &self.dirs.failed
                }
            };
            if let Err(err) = move_into(&file, target) {
                error!("error moving file {}: {err}", file.display());
            }
        }
    }

    fn waiting_files(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.dirs.waiting)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                files.push(entry.path());
            }
        }
        files.sort();
        Ok(files)
    }

    async fn import_file(&self, path: &Path) -> Result<()> {
        info!("importing orders from {}", path.display());

        let reader = OrderReader::new(File::open(path)?);
        for row in reader.rows() {
            let order = self.build_order(row?).await?;

            // Idempotent re-ingestion: the order id is the natural key.
            if self.storage.order(&order.id).await?.is_some() {
                debug!("order already exists: {}", order.id);
                continue;
            }
            self.storage.insert_order(order).await?;
        }

        info!("orders imported successfully from {}", path.display());
        Ok(())
    }

    async fn build_order(&self, row: OrderRow) -> Result<Order> {
        let merchant = self
            .storage
            .merchant_by_reference(&row.merchant_reference)
            .await?
            .ok_or_else(|| DisbursementError::UnknownMerchant(row.merchant_reference.clone()))?;

        Ok(Order {
            id: row.id,
            merchant_id: merchant.id,
            fee_amount: FeeCalculator::fee_amount(row.amount),
            amount: row.amount,
            created_at: row.created_at,
            disbursed: false,
        })
    }
}

fn move_into(file: &Path, target_dir: &Path) -> std::io::Result<()> {
    let name = file
        .file_name()
        .ok_or_else(|| std::io::Error::other("file has no name"))?;
    std::fs::rename(file, target_dir.join(name))
}
