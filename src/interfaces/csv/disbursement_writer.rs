use std::io::Write;

use crate::domain::disbursement::MerchantDisbursement;
use crate::error::Result;

/// Writes disbursement rows as `;`-delimited CSV, one serialized row per
/// settlement, header included.
pub struct DisbursementWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> DisbursementWriter<W> {
    pub fn new(sink: W) -> Self {
        let writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);
        Self { writer }
    }

    pub fn write_disbursements(&mut self, disbursements: Vec<MerchantDisbursement>) -> Result<()> {
        for disbursement in disbursements {
            self.writer.serialize(disbursement)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
