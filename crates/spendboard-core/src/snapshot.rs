//! CSV snapshot of the enriched table
//!
//! Written once per startup for inspection outside the dashboard, overwriting
//! any previous snapshot. Rows are sorted by date (stable, so same-day rows
//! keep sheet order).

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use crate::error::{Error, Result};
use crate::models::{Category, MonthYear, Table, Transaction};

/// Default snapshot file name
pub const DEFAULT_SNAPSHOT_PATH: &str = "personal_expenses_sorted.csv";

/// One snapshot line; field order is the column order
#[derive(Debug, Serialize)]
struct SnapshotRow<'a> {
    date: NaiveDate,
    description: &'a str,
    amount: f64,
    category: Category,
    month: u32,
    year: i32,
    month_year: MonthYear,
}

impl<'a> From<&'a Transaction> for SnapshotRow<'a> {
    fn from(tx: &'a Transaction) -> Self {
        Self {
            date: tx.date,
            description: &tx.description,
            amount: tx.amount,
            category: tx.category,
            month: tx.month,
            year: tx.year,
            month_year: tx.month_year,
        }
    }
}

/// Transactions in snapshot order
fn sorted(table: &Table) -> Vec<&Transaction> {
    let mut rows: Vec<&Transaction> = table.transactions().iter().collect();
    rows.sort_by_key(|tx| tx.date);
    rows
}

/// Write the snapshot to any writer
pub fn write_to<W: std::io::Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    if table.is_empty() {
        // serde only emits the header alongside the first record
        wtr.write_record([
            "date",
            "description",
            "amount",
            "category",
            "month",
            "year",
            "month_year",
        ])?;
    }

    for tx in sorted(table) {
        wtr.serialize(SnapshotRow::from(tx))?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the snapshot file, replacing any existing one
pub fn write(table: &Table, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        Error::Snapshot(format!("Failed to create {}: {}", path.display(), e))
    })?;

    write_to(table, file)
        .map_err(|e| Error::Snapshot(format!("Failed to write {}: {}", path.display(), e)))?;

    info!(
        "Wrote snapshot of {} transactions to {}",
        table.len(),
        path.display()
    );
    Ok(())
}
