//! Spendboard CLI - Personal expenses dashboard
//!
//! Usage:
//!   spendboard --source sheet.csv serve           Start the dashboard on $PORT
//!   spendboard --source URL snapshot              Write the sorted CSV snapshot
//!   spendboard --source sheet.csv report -c Fuel  Print views for a tab
//!   spendboard rules test "dmart vegetables"      Show which rules match

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let inputs = commands::Inputs::from_cli(&cli);

    match cli.command {
        Commands::Serve {
            port,
            host,
            static_dir,
            snapshot,
        } => commands::cmd_serve(&inputs, &host, port, static_dir, snapshot.path()).await,
        Commands::Snapshot { snapshot } => commands::cmd_snapshot(&inputs, snapshot.path()).await,
        Commands::Report { category, json } => commands::cmd_report(&inputs, &category, json).await,
        Commands::Rules { action } => match action {
            None | Some(RulesAction::Show) => commands::cmd_rules_show(&inputs),
            Some(RulesAction::Test { description }) => {
                commands::cmd_rules_test(&inputs, &description)
            }
        },
    }
}
