//! Spendboard Core Library
//!
//! Shared functionality for the Spendboard expenses dashboard:
//! - Spreadsheet sources (local CSV export or published sheet URL)
//! - Keyword rules and the last-match-wins categorizer
//! - Date parsing and calendar enrichment
//! - CSV snapshot of the enriched table
//! - Pie, bar and scatter views filtered by dashboard tab
//! - The startup pipeline tying these together

pub mod categorize;
pub mod enrich;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod rules;
pub mod snapshot;
pub mod source;
pub mod views;

/// Test utilities including mock spreadsheet server
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use categorize::{Categorizer, RuleTrace};
pub use error::{Error, Result};
pub use models::{
    tabs, CategorizedRow, Category, MonthYear, Selection, SourceRow, Tab, Table, Transaction,
};
pub use pipeline::{PipelineOptions, PipelineOutput, SnapshotStatus};
pub use rules::{CategoryRule, RuleOrigin, RuleSet};
pub use source::{source_for, ColumnMap, FileSource, HttpSource, TransactionSource};
pub use views::{
    build_dashboard, summarize, BarView, DashboardView, PieView, ScatterView, Summary,
};
