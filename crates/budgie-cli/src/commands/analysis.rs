//! Budget and spending command implementations
//!
//! The CLI has no stored profiles, so each run analyzes the figures it is given.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use budgie_core::{
    budget, format_usd, spending, BudgetReport, NewProfile, ProfileStore, SpendingReport,
};

pub fn cmd_budget(profile: NewProfile) -> Result<()> {
    let report = budget_report(profile)?;
    print!("{}", format_budget(&report));
    Ok(())
}

pub fn cmd_spending(file: &Path, name: &str) -> Result<()> {
    let raw = fs::read_to_string(file)
        .with_context(|| format!("Failed to read spending file: {}", file.display()))?;

    match spending_report(name, &raw) {
        Ok(report) => print!("{}", format_spending(&report)),
        // Bad data is a user-facing message, not a crash
        Err(e) => println!("{}", e.user_message()),
    }
    Ok(())
}

/// Build a budget report for a profile that lives only for this run
pub fn budget_report(profile: NewProfile) -> Result<BudgetReport> {
    let store = ProfileStore::new();
    let name = profile.name.clone();
    store.create_or_replace(profile);
    Ok(budget::summarize(&store, &name)?)
}

pub fn spending_report(name: &str, raw: &str) -> budgie_core::Result<SpendingReport> {
    let entries = spending::parse_spending(raw)?;
    spending::build_report(name, entries)
}

/// Summary text followed by the recommended vs current table
pub fn format_budget(report: &BudgetReport) -> String {
    let mut out = format!("{}\n\n", report.summary);
    out.push_str(&format!(
        "   {:<15} {:>5} {:>14} {:>14}\n",
        "Category", "Share", "Recommended", "Current"
    ));
    out.push_str("   ─────────────────────────────────────────────────────\n");
    for row in &report.rows {
        out.push_str(&format!(
            "   {:<15} {:>4}% {:>14} {:>14}\n",
            row.category.as_str(),
            row.recommended_percent,
            format_usd(row.recommended_amount),
            format_usd(row.current_amount)
        ));
    }
    out
}

/// Insights text followed by each category's share of the total
pub fn format_spending(report: &SpendingReport) -> String {
    let mut out = format!("{}\n\n", report.insights);
    for entry in &report.entries {
        let share = if report.total > 0.0 {
            entry.amount / report.total * 100.0
        } else {
            0.0
        };
        out.push_str(&format!(
            "   {:<20} {:>14} {:>6.1}%\n",
            entry.category,
            format_usd(entry.amount),
            share
        ));
    }
    out
}
