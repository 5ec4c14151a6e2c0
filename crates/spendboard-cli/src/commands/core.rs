//! Shared command utilities
//!
//! This module contains:
//! - `Inputs` - Source, rules and column settings taken from global flags
//! - `load_rules` - Resolve the category rule table
//! - `run_pipeline` / `build_table` - Run the startup pipeline

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use spendboard_core::{
    pipeline, source_for, Categorizer, ColumnMap, PipelineOptions, PipelineOutput, RuleSet,
    Table, TransactionSource,
};

use crate::cli::Cli;

/// Global settings every command draws from
#[derive(Debug, Clone)]
pub struct Inputs {
    pub source: Option<String>,
    pub source_token: Option<String>,
    pub timeout: Duration,
    pub rules: Option<PathBuf>,
    pub columns: ColumnMap,
}

impl Inputs {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            source: cli.source.clone(),
            source_token: cli.source_token.clone(),
            timeout: Duration::from_secs(cli.timeout),
            rules: cli.rules.clone(),
            columns: ColumnMap {
                date: cli.columns.date_column.clone(),
                description: cli.columns.description_column.clone(),
                amount: cli.columns.amount_column.clone(),
            },
        }
    }

    /// The configured sheet source
    pub fn source(&self) -> Result<Box<dyn TransactionSource>> {
        let location = self
            .source
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .context("No source configured: pass --source or set SPENDBOARD_SOURCE")?;

        Ok(source_for(location, self.source_token.clone(), self.timeout))
    }
}

/// Load the rule table from --rules, the data directory, or the built-in rules
pub fn load_rules(inputs: &Inputs) -> Result<RuleSet> {
    RuleSet::load(inputs.rules.as_deref()).context("Failed to load category rules")
}

/// Run load -> categorize -> enrich -> snapshot
pub async fn run_pipeline(inputs: &Inputs, snapshot: Option<PathBuf>) -> Result<PipelineOutput> {
    let rules = load_rules(inputs)?;
    let categorizer = Categorizer::new(rules);
    let source = inputs.source()?;

    let options = PipelineOptions {
        columns: inputs.columns.clone(),
        snapshot,
    };

    pipeline::run(source.as_ref(), &categorizer, &options)
        .await
        .with_context(|| format!("Failed to build table from {}", source.describe()))
}

/// Run the pipeline and keep only the table
pub async fn build_table(inputs: &Inputs, snapshot: Option<PathBuf>) -> Result<Table> {
    Ok(run_pipeline(inputs, snapshot).await?.table)
}
