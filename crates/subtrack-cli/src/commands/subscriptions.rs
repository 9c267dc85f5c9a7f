//! Subscription command implementations

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use subtrack_core::{
    evaluate, format_currency, normalize, parse_date, BillingCycle, NormalizedSubscription,
    Portfolio, Settings, SubscriptionDraft,
};
use tracing::info;

use super::{build_query, resolve_category, resolve_today, truncate};
use crate::cli::ViewArgs;

pub fn cmd_list(
    portfolio: &Portfolio,
    settings: &Settings,
    view: &ViewArgs,
    page: i64,
    page_size: Option<i64>,
    json: bool,
) -> Result<()> {
    let query = build_query(
        portfolio,
        view,
        page,
        page_size.unwrap_or(settings.page_size),
    )?;
    let result = evaluate(portfolio.subscriptions(), portfolio.categories(), &query)?;
    let rows = result.page(query.page_index)?;

    if json {
        println!("{}", serde_json::to_string_pretty(rows)?);
        return Ok(());
    }

    if portfolio.subscriptions().is_empty() {
        println!("No subscriptions yet. Add one with:");
        println!("  subtrack add Netflix --cost 15.49");
        return Ok(());
    }

    let shown_page = query.page_index.clamp(1, result.page_count);
    let sym = &settings.currency_symbol;

    println!();
    println!(
        "📋 Subscriptions ({} matched, page {} of {}, by {})",
        result.total_matched, shown_page, result.page_count, query.sort_key
    );
    println!("   ────────────────────────────────────────────────────────────────────────────");

    if rows.is_empty() {
        println!("   Nothing matches these filters.");
        return Ok(());
    }

    println!(
        "   {:>4} │ {:20} │ {:14} │ {:>10} │ {:9} │ {:>11} │ {:10}",
        "ID", "Service", "Category", "Cost", "Cycle", "Per year", "Started"
    );
    for sub in rows {
        print_row(portfolio, sub, sym);
    }

    Ok(())
}

fn print_row(portfolio: &Portfolio, sub: &NormalizedSubscription, sym: &str) {
    let s = &sub.subscription;
    println!(
        "   {:>4} │ {:20} │ {:14} │ {:>10} │ {:9} │ {:>11} │ {}{}",
        s.id,
        truncate(&s.service_name, 20),
        truncate(portfolio.category_name(s.category_id), 14),
        format_currency(s.cost, sym),
        s.billing_cycle,
        format_currency(sub.annualized_cost, sym),
        s.start_date,
        if s.auto_renews { "" } else { " (no renew)" }
    );
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    portfolio: &mut Portfolio,
    settings: &Settings,
    name: &str,
    cost: f64,
    cycle: &str,
    category: Option<&str>,
    start: Option<&str>,
    auto_renews: bool,
) -> Result<i64> {
    let billing_cycle: BillingCycle = cycle.parse()?;
    let category_id = match category {
        Some(c) => Some(resolve_category(portfolio, c)?),
        None => None,
    };
    let start_date = resolve_today(start).context("Invalid --start date")?;

    let id = portfolio.add_subscription(SubscriptionDraft {
        service_name: name.to_string(),
        cost,
        billing_cycle,
        category_id,
        auto_renews,
        start_date,
    })?;
    info!(id, service = name, "added subscription");

    let added = portfolio
        .get_subscription(id)
        .ok_or_else(|| anyhow::anyhow!("Subscription {} missing after insert", id))?;
    println!(
        "✅ Added {} (ID: {}) - {} per year",
        added.service_name(),
        id,
        format_currency(added.annualized_cost, &settings.currency_symbol)
    );
    Ok(id)
}

#[allow(clippy::too_many_arguments)]
pub fn cmd_update(
    portfolio: &mut Portfolio,
    id: i64,
    name: Option<&str>,
    cost: Option<f64>,
    cycle: Option<&str>,
    category: Option<&str>,
    start: Option<&str>,
    auto_renews: Option<bool>,
) -> Result<()> {
    let current = portfolio
        .get_subscription(id)
        .ok_or_else(|| anyhow::anyhow!("Subscription not found: {}", id))?
        .subscription
        .clone();

    let draft = SubscriptionDraft {
        service_name: name.map(str::to_string).unwrap_or(current.service_name),
        cost: cost.unwrap_or(current.cost),
        billing_cycle: match cycle {
            Some(c) => c.parse::<BillingCycle>()?,
            None => current.billing_cycle,
        },
        category_id: match category {
            // A real category called "none" wins over the keyword
            Some(c) => match portfolio.find_category(c) {
                Some(found) => Some(found.id),
                None if c.trim().eq_ignore_ascii_case("none") => None,
                None => anyhow::bail!("Category not found: {}", c),
            },
            None => current.category_id,
        },
        auto_renews: auto_renews.unwrap_or(current.auto_renews),
        start_date: match start {
            Some(s) => parse_date(s).context("Invalid --start date format (use YYYY-MM-DD)")?,
            None => current.start_date,
        },
    };

    portfolio.update_subscription(id, draft)?;
    info!(id, "updated subscription");
    println!("✅ Updated subscription {}", id);
    Ok(())
}

pub fn cmd_delete(portfolio: &mut Portfolio, id: i64) -> Result<()> {
    let name = portfolio
        .get_subscription(id)
        .map(|s| s.service_name().to_string())
        .ok_or_else(|| anyhow::anyhow!("Subscription not found: {}", id))?;
    portfolio.delete_subscription(id)?;
    info!(id, "deleted subscription");
    println!("🗑️  Deleted {} (ID: {})", name, id);
    Ok(())
}

pub fn cmd_preview(settings: &Settings, cost: f64, cycle: &str) -> Result<()> {
    let cycle: BillingCycle = cycle.parse()?;
    let breakdown = normalize(cost, cycle)?;
    let sym = &settings.currency_symbol;

    println!();
    println!("💵 {} {}", format_currency(cost, sym), cycle);
    println!("   Per month: {}", format_currency(breakdown.monthly_cost, sym));
    println!("   Per year:  {}", format_currency(breakdown.annualized_cost, sym));
    Ok(())
}

/// Render subscriptions as CSV (header + one row each)
pub fn export_csv(portfolio: &Portfolio, items: &[NormalizedSubscription]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record([
        "id",
        "service_name",
        "category",
        "billing_cycle",
        "cost",
        "monthly_cost",
        "annualized_cost",
        "auto_renews",
        "start_date",
    ])?;

    for sub in items {
        let s = &sub.subscription;
        writer.write_record([
            s.id.to_string(),
            s.service_name.clone(),
            portfolio.category_name(s.category_id).to_string(),
            s.billing_cycle.to_string(),
            format!("{:.2}", s.cost),
            format!("{:.2}", sub.monthly_cost),
            format!("{:.2}", sub.annualized_cost),
            s.auto_renews.to_string(),
            s.start_date.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish CSV: {}", e))?;
    Ok(String::from_utf8(bytes)?)
}

pub fn cmd_export(portfolio: &Portfolio, view: &ViewArgs, output: Option<PathBuf>) -> Result<()> {
    // Export covers the whole matched view, so page size only needs to be valid
    let query = build_query(portfolio, view, 1, 1)?;
    let result = evaluate(portfolio.subscriptions(), portfolio.categories(), &query)?;
    let csv = export_csv(portfolio, &result.items)?;

    match output {
        Some(path) => {
            let mut file = File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            file.write_all(csv.as_bytes())?;
            println!(
                "✅ Exported {} subscriptions to {}",
                result.total_matched,
                path.display()
            );
        }
        None => {
            print!("{}", csv);
        }
    }

    Ok(())
}
