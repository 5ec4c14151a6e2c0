//! Report command implementation

use anyhow::{anyhow, Result};
use spendboard_core::{build_dashboard, DashboardView, Selection};

use super::{build_table, truncate, Inputs};

/// Parse a tab value from the command line
pub fn parse_selection(category: &str) -> Result<Selection> {
    category
        .parse::<Selection>()
        .map_err(|e| anyhow!(e))
}

pub async fn cmd_report(inputs: &Inputs, category: &str, json: bool) -> Result<()> {
    let selection = parse_selection(category)?;
    // Reports never touch the snapshot
    let table = build_table(inputs, None).await?;
    let view = build_dashboard(&table, selection);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        print!("{}", render_report(&view));
    }

    Ok(())
}

/// Render the pie and bar views as terminal tables
pub fn render_report(view: &DashboardView) -> String {
    let mut out = String::new();

    out.push('\n');
    out.push_str(&format!("📊 {}\n", view.pie.title));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");

    if view.pie.slices.is_empty() {
        out.push_str("   No spending for this selection.\n");
        return out;
    }

    let total: f64 = view.pie.slices.iter().map(|s| s.amount).sum();
    out.push_str(&format!("   Total: {:.2}\n\n", total));
    out.push_str(&format!("   {:30} │ {:>10} │ {:>6}\n", "Label", "Amount", "%"));
    out.push_str("   ───────────────────────────────┼────────────┼───────\n");
    for slice in &view.pie.slices {
        let pct = if total != 0.0 {
            slice.amount / total * 100.0
        } else {
            0.0
        };
        out.push_str(&format!(
            "   {:30} │ {:>10.2} │ {:>5.1}%\n",
            truncate(&slice.label, 30),
            slice.amount,
            pct
        ));
    }

    out.push('\n');
    out.push_str(&format!("📅 {}\n", view.bar.title));
    out.push_str("   ─────────────────────────────────────────────────────────────\n");
    for bar in &view.bar.bars {
        out.push_str(&format!("   {:10} │ {:>10.2}\n", bar.month_year.label(), bar.amount));
    }

    out
}
