//! Chart views over the enriched table
//!
//! Each builder is a pure function of the table and the selected tab. Sums are
//! plain `f64` additions; rounding is left to whoever displays them.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{Category, MonthYear, Selection, Table};

/// One pie slice: a category (Total) or a description (single category)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieView {
    pub title: String,
    pub slices: Vec<PieSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarPoint {
    pub month_year: MonthYear,
    pub amount: f64,
}

/// Monthly totals in calendar order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarView {
    pub title: String,
    pub bars: Vec<BarPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub date: NaiveDate,
    pub amount: f64,
    pub category: Category,
}

/// One point per transaction, in table order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterView {
    pub title: String,
    pub points: Vec<ScatterPoint>,
}

/// Everything a tab switch redraws
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub selection: Selection,
    pub pie: PieView,
    pub bar: BarView,
    pub scatter: ScatterView,
}

/// Table-wide figures for status output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub transactions: usize,
    pub total: f64,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Rows no rule matched
    pub uncategorized: usize,
}

pub fn pie_title(selection: Selection) -> String {
    match selection {
        Selection::Total => "Total Spending Breakdown".to_string(),
        Selection::Category(c) => format!("{} Breakdown", c),
    }
}

pub const BAR_TITLE: &str = "Monthly Spending Overview";

pub fn scatter_title(selection: Selection) -> String {
    match selection {
        Selection::Total => "Scatter Plot for All Categories".to_string(),
        Selection::Category(c) => format!("Scatter Plot for {}", c),
    }
}

/// Spending split by category (Total) or by description (single category)
///
/// Slices keep the order in which their label first appears in the table.
pub fn pie_view(table: &Table, selection: Selection) -> PieView {
    let mut slices: Vec<PieSlice> = Vec::new();

    for tx in table.select(selection) {
        let label = match selection {
            Selection::Total => tx.category.as_str(),
            Selection::Category(_) => tx.description.as_str(),
        };

        match slices.iter_mut().find(|s| s.label == label) {
            Some(slice) => slice.amount += tx.amount,
            None => slices.push(PieSlice {
                label: label.to_string(),
                amount: tx.amount,
            }),
        }
    }

    PieView {
        title: pie_title(selection),
        slices,
    }
}

/// Spending per calendar month
pub fn bar_view(table: &Table, selection: Selection) -> BarView {
    let mut totals: BTreeMap<MonthYear, f64> = BTreeMap::new();
    for tx in table.select(selection) {
        *totals.entry(tx.month_year).or_insert(0.0) += tx.amount;
    }

    BarView {
        title: BAR_TITLE.to_string(),
        bars: totals
            .into_iter()
            .map(|(month_year, amount)| BarPoint { month_year, amount })
            .collect(),
    }
}

/// Individual transactions over time
pub fn scatter_view(table: &Table, selection: Selection) -> ScatterView {
    ScatterView {
        title: scatter_title(selection),
        points: table
            .select(selection)
            .map(|tx| ScatterPoint {
                date: tx.date,
                amount: tx.amount,
                category: tx.category,
            })
            .collect(),
    }
}

pub fn build_dashboard(table: &Table, selection: Selection) -> DashboardView {
    DashboardView {
        selection,
        pie: pie_view(table, selection),
        bar: bar_view(table, selection),
        scatter: scatter_view(table, selection),
    }
}

pub fn summarize(table: &Table) -> Summary {
    let txs = table.transactions();
    Summary {
        transactions: txs.len(),
        total: table.total_amount(),
        first_date: txs.iter().map(|tx| tx.date).min(),
        last_date: txs.iter().map(|tx| tx.date).max(),
        uncategorized: table.select(Selection::Category(Category::Unassigned)).count(),
    }
}
