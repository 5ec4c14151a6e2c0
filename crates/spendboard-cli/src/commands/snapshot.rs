//! Snapshot command implementation

use std::path::PathBuf;

use anyhow::Result;
use spendboard_core::{summarize, SnapshotStatus};

use super::{run_pipeline, Inputs};

pub async fn cmd_snapshot(inputs: &Inputs, snapshot: Option<PathBuf>) -> Result<()> {
    let output = run_pipeline(inputs, snapshot).await?;
    let summary = summarize(&output.table);

    println!();
    println!("📊 Spendboard Snapshot");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Transactions: {}", summary.transactions);
    println!("   Total: {:.2}", summary.total);
    if let (Some(first), Some(last)) = (summary.first_date, summary.last_date) {
        println!("   Period: {} to {}", first, last);
    }
    if summary.uncategorized > 0 {
        println!("   Unassigned: {}", summary.uncategorized);
    }
    println!("   {}", snapshot_line(&output.snapshot));

    Ok(())
}

/// Status line for the snapshot outcome of this run
pub fn snapshot_line(status: &SnapshotStatus) -> String {
    match status {
        SnapshotStatus::Written(path) => format!("Snapshot: {}", path.display()),
        SnapshotStatus::Failed { path, reason } => {
            format!("⚠️  Snapshot not written: {} ({})", path.display(), reason)
        }
        SnapshotStatus::Skipped => "Snapshot: skipped (--no-snapshot)".to_string(),
    }
}
