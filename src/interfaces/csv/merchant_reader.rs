use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;
use uuid::Uuid;

use crate::domain::merchant::{DisbursementFrequency, Merchant};
use crate::error::{DisbursementError, Result};

#[derive(Debug, Deserialize)]
struct MerchantSeed {
    reference: String,
    disbursement_frequency: DisbursementFrequency,
    minimum_monthly_fee: Decimal,
}

/// Reads merchant seed records from a `;`-delimited source with header
/// `reference;disbursement_frequency;minimum_monthly_fee`, assigning each
/// merchant a fresh id.
pub struct MerchantReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> MerchantReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(b';')
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { reader }
    }

    pub fn merchants(self) -> impl Iterator<Item = Result<Merchant>> {
        self.reader.into_deserialize().map(|result| {
            let seed: MerchantSeed = result.map_err(DisbursementError::from)?;
            Ok(Merchant {
                id: Uuid::new_v4(),
                reference: seed.reference,
                disbursement_frequency: seed.disbursement_frequency,
                minimum_monthly_fee: seed.minimum_monthly_fee,
            })
        })
    }
}
