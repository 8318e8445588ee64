use thiserror::Error;

pub type Result<T> = std::result::Result<T, DisbursementError>;

#[derive(Error, Debug)]
pub enum DisbursementError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("line {line}: expected {expected} fields, found {found}")]
    MalformedRecord {
        line: u64,
        expected: usize,
        found: usize,
    },
    #[error("unknown merchant reference: {0}")]
    UnknownMerchant(String),
    #[error("unknown merchant id: {0}")]
    UnknownMerchantId(uuid::Uuid),
    #[error("invalid amount {raw:?}: {source}")]
    InvalidAmount {
        raw: String,
        source: rust_decimal::Error,
    },
    #[error("invalid date {raw:?}: {source}")]
    InvalidDate {
        raw: String,
        source: chrono::ParseError,
    },
    #[error("storage error: {0}")]
    Storage(String),
}
