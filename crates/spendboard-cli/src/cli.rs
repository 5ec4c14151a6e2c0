//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Spendboard - Personal expenses dashboard
#[derive(Parser)]
#[command(name = "spendboard")]
#[command(about = "Categorize a spreadsheet of expenses and chart it", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Expenses sheet: a local CSV export or an http(s) URL returning CSV
    #[arg(long, env = "SPENDBOARD_SOURCE", global = true)]
    pub source: Option<String>,

    /// Bearer token sent when the source is a URL
    #[arg(long, env = "SPENDBOARD_SOURCE_TOKEN", global = true, hide_env_values = true)]
    pub source_token: Option<String>,

    /// Seconds to wait for a sheet download
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,

    /// Category rules file (defaults to the built-in rules)
    #[arg(long, env = "SPENDBOARD_RULES", global = true)]
    pub rules: Option<PathBuf>,

    #[command(flatten)]
    pub columns: ColumnArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Sheet column names
#[derive(Args, Debug, Clone)]
pub struct ColumnArgs {
    /// Column holding the completion date
    #[arg(long, default_value = "Completion_Date", global = true)]
    pub date_column: String,

    /// Column holding the description
    #[arg(long, default_value = "Description", global = true)]
    pub description_column: String,

    /// Column holding the amount
    #[arg(long, default_value = "Amount", global = true)]
    pub amount_column: String,
}

/// Where the snapshot goes
#[derive(Args, Debug, Clone)]
pub struct SnapshotArgs {
    /// Snapshot CSV path
    #[arg(long, env = "SPENDBOARD_SNAPSHOT", default_value = "personal_expenses_sorted.csv")]
    pub snapshot: PathBuf,

    /// Skip writing the snapshot
    #[arg(long)]
    pub no_snapshot: bool,
}

impl SnapshotArgs {
    pub fn path(&self) -> Option<PathBuf> {
        if self.no_snapshot {
            None
        } else {
            Some(self.snapshot.clone())
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the table and start the dashboard server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "10000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Directory containing extra static files to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,

        #[command(flatten)]
        snapshot: SnapshotArgs,
    },

    /// Build the table, write the snapshot and print a summary
    Snapshot {
        #[command(flatten)]
        snapshot: SnapshotArgs,
    },

    /// Print the pie and bar views for a tab
    Report {
        /// Tab: Total or a category name
        #[arg(short, long, default_value = "Total")]
        category: String,

        /// Print the dashboard view as JSON
        #[arg(long)]
        json: bool,
    },

    /// Inspect the category rules
    Rules {
        #[command(subcommand)]
        action: Option<RulesAction>,
    },
}

#[derive(Subcommand)]
pub enum RulesAction {
    /// List rules in evaluation order
    Show,

    /// Test which rules match a description
    Test {
        /// Description to test
        description: String,
    },
}
