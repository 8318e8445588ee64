pub mod disbursement_writer;
pub mod merchant_reader;
pub mod order_reader;
