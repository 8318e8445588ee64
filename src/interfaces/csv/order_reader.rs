use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::io::Read;

use crate::error::{DisbursementError, Result};

const FIELD_SEPARATOR: u8 = b';';
const FIELD_COUNT: usize = 4;
const DATE_FORMAT: &str = "%Y-%m-%d";

/// One parsed line of an order file, before merchant resolution.
#[derive(Debug, PartialEq, Clone)]
pub struct OrderRow {
    pub id: String,
    pub merchant_reference: String,
    pub amount: Decimal,
    pub created_at: NaiveDate,
}

/// Reads order rows from a `;`-delimited source.
///
/// The first line is treated as a header and skipped without validating its
/// content. Every data line must carry exactly 4 fields
/// (`id;merchant_reference;amount;created_at`); field values are parsed
/// strictly, with no whitespace trimming.
pub struct OrderReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> OrderReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .delimiter(FIELD_SEPARATOR)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and parses order rows, so large
    /// files stream without loading the whole dataset into memory.
    pub fn rows(self) -> impl Iterator<Item = Result<OrderRow>> {
        self.reader
            .into_records()
            .map(|record| parse_row(&record?))
    }
}

fn parse_row(record: &csv::StringRecord) -> Result<OrderRow> {
    if record.len() != FIELD_COUNT {
        return Err(DisbursementError::MalformedRecord {
            line: record.position().map(|p| p.line()).unwrap_or_default(),
            expected: FIELD_COUNT,
            found: record.len(),
        });
    }

    let amount = record[2]
        .parse::<Decimal>()
        .map_err(|source| DisbursementError::InvalidAmount {
            raw: record[2].to_string(),
            source,
        })?;
    let created_at = NaiveDate::parse_from_str(&record[3], DATE_FORMAT).map_err(|source| {
        DisbursementError::InvalidDate {
            raw: record[3].to_string(),
            source,
        }
    })?;

    Ok(OrderRow {
        id: record[0].to_string(),
        merchant_reference: record[1].to_string(),
        amount,
        created_at,
    })
}
