//! Category command implementations

use anyhow::Result;
use subtrack_core::{aggregate_by_category, format_currency, portfolio_totals, Portfolio, Settings};
use tracing::info;

use super::truncate;

/// Per-category breakdown, most expensive first
pub fn cmd_categories(portfolio: &Portfolio, settings: &Settings) -> Result<()> {
    if portfolio.categories().is_empty() {
        println!("No categories yet. Add one with:");
        println!("  subtrack categories add Streaming");
        return Ok(());
    }

    let stats = aggregate_by_category(portfolio.subscriptions(), portfolio.categories());
    let totals = portfolio_totals(portfolio.subscriptions(), portfolio.categories());
    let sym = &settings.currency_symbol;

    println!();
    println!("📂 Spending by Category");
    println!("   ──────────────────────────────────────────────────────────────");
    println!(
        "   {:>4} │ {:20} │ {:>5} │ {:>11} │ {:>12}",
        "ID", "Category", "Subs", "Per month", "Per year"
    );

    for stat in &stats {
        println!(
            "   {:>4} │ {:20} │ {:>5} │ {:>11} │ {:>12}",
            stat.category_id,
            truncate(&stat.name, 20),
            stat.subscription_count,
            format_currency(stat.total_monthly_cost, sym),
            format_currency(stat.total_annualized_cost, sym),
        );
    }

    if totals.uncategorized_count > 0 {
        println!();
        println!(
            "   {} subscription(s) have no category",
            totals.uncategorized_count
        );
    }

    println!("   ──────────────────────────────────────────────────────────────");
    println!(
        "   {:>4}   {:20}   {:>5}   {:>11}   {:>12}",
        "",
        "Total",
        portfolio.subscriptions().len(),
        format_currency(totals.total_portfolio_monthly_cost, sym),
        format_currency(totals.total_portfolio_annualized_cost, sym),
    );

    Ok(())
}

pub fn cmd_category_add(portfolio: &mut Portfolio, name: &str) -> Result<i64> {
    let id = portfolio.add_category(name)?;
    info!(id, name, "added category");
    println!("✅ Added category {} (ID: {})", name.trim(), id);
    Ok(id)
}

pub fn cmd_category_rename(portfolio: &mut Portfolio, category: &str, new_name: &str) -> Result<()> {
    let (id, old_name) = portfolio
        .find_category(category)
        .map(|c| (c.id, c.name.clone()))
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", category))?;

    portfolio.rename_category(id, new_name)?;
    info!(id, "renamed category");
    println!("✅ Renamed {} to {}", old_name, new_name.trim());
    Ok(())
}

pub fn cmd_category_delete(portfolio: &mut Portfolio, category: &str) -> Result<()> {
    let (id, name) = portfolio
        .find_category(category)
        .map(|c| (c.id, c.name.clone()))
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", category))?;

    let orphaned = portfolio.delete_category(id)?;
    info!(id, orphaned, "deleted category");
    println!("🗑️  Deleted category {}", name);
    if orphaned > 0 {
        println!("   {} subscription(s) are now Uncategorized", orphaned);
    }
    Ok(())
}
