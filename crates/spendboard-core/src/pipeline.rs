//! Startup pipeline: load, categorize, enrich, snapshot
//!
//! Runs once and returns the table the dashboard serves for the rest of the
//! process lifetime.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::categorize::Categorizer;
use crate::enrich::enrich;
use crate::error::Result;
use crate::models::Table;
use crate::snapshot::{self, DEFAULT_SNAPSHOT_PATH};
use crate::source::{load, ColumnMap, TransactionSource};

/// Options for a pipeline run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub columns: ColumnMap,
    /// Where to write the snapshot; `None` skips it
    pub snapshot: Option<PathBuf>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            columns: ColumnMap::default(),
            snapshot: Some(PathBuf::from(DEFAULT_SNAPSHOT_PATH)),
        }
    }
}

/// What happened to the snapshot during a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotStatus {
    Written(PathBuf),
    Failed { path: PathBuf, reason: String },
    Skipped,
}

impl SnapshotStatus {
    pub fn is_written(&self) -> bool {
        matches!(self, Self::Written(_))
    }
}

/// Result of a pipeline run
#[derive(Debug)]
pub struct PipelineOutput {
    pub table: Table,
    pub snapshot: SnapshotStatus,
}

/// Build the enriched table from a source
///
/// Load, categorization and enrichment errors abort the run. A snapshot that
/// can't be written is logged and reported in the output.
pub async fn run(
    source: &dyn TransactionSource,
    categorizer: &Categorizer,
    options: &PipelineOptions,
) -> Result<PipelineOutput> {
    info!("Loading transactions from {}", source.describe());
    let rows = load(source, &options.columns).await?;
    let categorized = categorizer.categorize(rows);
    let table = enrich(categorized)?;

    let snapshot = match &options.snapshot {
        Some(path) => match snapshot::write(&table, path) {
            Ok(()) => SnapshotStatus::Written(path.clone()),
            Err(e) => {
                warn!("Snapshot not written: {}", e);
                SnapshotStatus::Failed {
                    path: path.clone(),
                    reason: e.to_string(),
                }
            }
        },
        None => SnapshotStatus::Skipped,
    };

    info!(
        "Pipeline complete: {} transactions, total {:.2}",
        table.len(),
        table.total_amount()
    );
    Ok(PipelineOutput { table, snapshot })
}
