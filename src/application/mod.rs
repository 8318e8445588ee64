pub mod disbursement;
pub mod fees;
pub mod ingestion;
