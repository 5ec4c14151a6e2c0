//! Temporal enrichment: parse completion dates and derive calendar fields

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{CategorizedRow, Table, Transaction};

/// Datetime formats seen in sheet exports (time of day is dropped)
const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S", // 2024-01-15 13:45:00
    "%Y-%m-%dT%H:%M:%S", // 2024-01-15T13:45:00
    "%Y-%m-%d %H:%M",    // 2024-01-15 13:45
    "%m/%d/%Y %H:%M:%S", // 01/15/2024 13:45:00
];

/// Plain date formats
const DATE_FORMATS: [&str; 5] = [
    "%Y-%m-%d", // 2024-01-15
    "%m/%d/%y", // 01/15/24 (before %Y, which would read "24" as year 24)
    "%m/%d/%Y", // 01/15/2024
    "%m-%d-%Y", // 01-15-2024
    "%d/%m/%Y", // 15/01/2024 (European)
];

/// Parse a completion date, accepting dates and datetimes
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    None
}

/// Parse dates and derive month, year and month label for every row
///
/// Any unparseable date fails the whole table; there is no partial result.
/// Errors carry the sheet row number recorded by the loader.
pub fn enrich(rows: Vec<CategorizedRow>) -> Result<Table> {
    let transactions = rows
        .into_iter()
        .map(|categorized| {
            let date = parse_date(&categorized.row.date).ok_or_else(|| Error::InvalidDate {
                row: categorized.row.row,
                value: categorized.row.date.clone(),
            })?;
            Ok(Transaction::new(
                date,
                &categorized.row.description,
                categorized.row.amount,
                categorized.category,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    debug!("Enriched {} transactions", transactions.len());
    Ok(Table::new(transactions))
}
