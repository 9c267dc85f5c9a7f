//! Renewal command implementations

use anyhow::Result;
use chrono::NaiveDate;
use subtrack_core::{format_currency, upcoming_renewals, Portfolio, Settings};

use super::truncate;

pub fn cmd_renewals(
    portfolio: &Portfolio,
    settings: &Settings,
    days: Option<u32>,
    today: NaiveDate,
) -> Result<()> {
    let horizon = days.unwrap_or(settings.horizon_days);
    let renewals = upcoming_renewals(portfolio.subscriptions(), today, horizon)?;

    if renewals.is_empty() {
        println!("✅ Nothing renews in the next {} days.", horizon);
        return Ok(());
    }

    let sym = &settings.currency_symbol;
    println!();
    println!("📅 Renewing in the next {} days ({})", horizon, renewals.len());
    println!("   ──────────────────────────────────────────────────────");

    for renewal in &renewals {
        let sub = &renewal.subscription.subscription;
        let in_days = (renewal.next_renewal_date - today).num_days();
        println!(
            "   {} │ {:20} │ {:>10} {:9} │ {}",
            renewal.next_renewal_date,
            truncate(&sub.service_name, 20),
            format_currency(sub.cost, sym),
            sub.billing_cycle,
            match in_days {
                0 => "today".to_string(),
                1 => "tomorrow".to_string(),
                n => format!("in {} days", n),
            }
        );
    }

    Ok(())
}
