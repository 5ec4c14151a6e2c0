//! Category rule command implementations

use anyhow::Result;
use spendboard_core::Categorizer;

use super::{load_rules, Inputs};

pub fn cmd_rules_show(inputs: &Inputs) -> Result<()> {
    let rules = load_rules(inputs)?;

    println!();
    println!("📋 Category rules ({})", rules.origin());
    println!("   Evaluated top to bottom; the last matching rule wins");
    println!("   ─────────────────────────────────────────────────────────────");
    for (i, rule) in rules.rules().iter().enumerate() {
        println!(
            "   {}. {:14} {}",
            i + 1,
            rule.category().as_str(),
            rule.keywords().join(", ")
        );
    }

    Ok(())
}

pub fn cmd_rules_test(inputs: &Inputs, description: &str) -> Result<()> {
    let categorizer = Categorizer::new(load_rules(inputs)?);
    let trace = categorizer.trace(description);

    if trace.matched.is_empty() {
        println!(
            "No rules match \"{}\" -> {}",
            description,
            trace.category.as_str()
        );
        return Ok(());
    }

    println!();
    println!("🔍 Rules matching \"{}\":", description);
    println!("   ─────────────────────────────────────────────────────────────");
    for category in &trace.matched {
        println!("   {}", category.as_str());
    }
    println!();
    println!("   Label: {}", trace.category.as_str());
    if trace.overwritten() {
        println!(
            "   ⚠️  {} rules matched; earlier matches were overwritten",
            trace.matched.len()
        );
    }

    Ok(())
}
