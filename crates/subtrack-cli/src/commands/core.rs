//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_portfolio` / `save_portfolio` - Snapshot file access
//! - `load_settings` - Settings resolution
//! - `cmd_init` - Create an empty snapshot
//! - Argument helpers shared by the other commands

use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use subtrack_core::{
    parse_date, BillingCycle, Portfolio, QueryState, Settings, Snapshot, SortKey,
};
use tracing::{debug, info};

use crate::cli::ViewArgs;

/// Load and validate the snapshot file
pub fn open_portfolio(data_path: &Path) -> Result<Portfolio> {
    if !data_path.exists() {
        anyhow::bail!(
            "No subscription data at {}. Create it with: subtrack init",
            data_path.display()
        );
    }

    let content = fs::read_to_string(data_path)
        .with_context(|| format!("Failed to read {}", data_path.display()))?;
    let snapshot: Snapshot = serde_json::from_str(&content)
        .with_context(|| format!("Invalid JSON in {}", data_path.display()))?;
    let portfolio = Portfolio::from_snapshot(&snapshot)
        .with_context(|| format!("Invalid subscription data in {}", data_path.display()))?;

    debug!(
        categories = portfolio.categories().len(),
        subscriptions = portfolio.subscriptions().len(),
        "loaded snapshot"
    );
    Ok(portfolio)
}

/// Write the snapshot atomically (temp file + rename in the same directory)
pub fn save_portfolio(data_path: &Path, portfolio: &Portfolio) -> Result<()> {
    let dir = match data_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let json = serde_json::to_string_pretty(&portfolio.to_snapshot())?;
    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.persist(data_path)
        .with_context(|| format!("Failed to write {}", data_path.display()))?;

    debug!(path = %data_path.display(), "saved snapshot");
    Ok(())
}

pub fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    Settings::load(config_path).context("Failed to load settings")
}

/// Parse `--now`, defaulting to today's date
pub fn resolve_today(now: Option<&str>) -> Result<NaiveDate> {
    match now {
        Some(s) => parse_date(s).context("Invalid --now date format (use YYYY-MM-DD)"),
        None => Ok(Utc::now().date_naive()),
    }
}

/// Resolve a category argument (name or ID) to an ID
pub fn resolve_category(portfolio: &Portfolio, name_or_id: &str) -> Result<i64> {
    portfolio
        .find_category(name_or_id)
        .map(|c| c.id)
        .ok_or_else(|| anyhow::anyhow!("Category not found: {}", name_or_id))
}

/// Turn view arguments into a query
pub fn build_query(
    portfolio: &Portfolio,
    view: &ViewArgs,
    page: i64,
    page_size: i64,
) -> Result<QueryState> {
    let category = match view.category.as_deref() {
        Some(c) => Some(resolve_category(portfolio, c)?),
        None => None,
    };
    let cycle = view
        .cycle
        .as_deref()
        .map(|c| c.parse::<BillingCycle>())
        .transpose()
        .context("Invalid --cycle")?;
    let sort: SortKey = if view.sort.trim().is_empty() {
        SortKey::default()
    } else {
        view.sort.parse().map_err(|e: String| anyhow::anyhow!(e))?
    };

    Ok(QueryState::new()
        .search(view.search.clone().unwrap_or_default())
        .category(category)
        .billing_cycle(cycle)
        .sort_by(sort)
        .page_size(page_size)
        .page(page))
}

pub fn cmd_init(data_path: &Path, force: bool) -> Result<()> {
    if data_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            data_path.display()
        );
    }

    println!("🔧 Creating subscription data at {}...", data_path.display());
    save_portfolio(data_path, &Portfolio::new())?;
    info!(path = %data_path.display(), "initialized snapshot");

    println!("✅ Ready!");
    println!();
    println!("Next steps:");
    println!("  1. Add a category: subtrack categories add Streaming");
    println!("  2. Add a subscription: subtrack add Netflix --cost 15.49 --category Streaming");
    println!("  3. See the overview: subtrack dashboard");

    Ok(())
}
