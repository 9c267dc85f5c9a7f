//! Dashboard command

use anyhow::Result;
use chrono::NaiveDate;
use subtrack_core::{
    aggregate_by_category, dashboard_summary, format_currency, portfolio_totals,
    recommend_budget_actions_with_total, upcoming_renewals, Portfolio, RecommendationLevel,
    Settings,
};

pub fn cmd_dashboard(portfolio: &Portfolio, settings: &Settings, today: NaiveDate) -> Result<()> {
    let subs = portfolio.subscriptions();
    let summary = dashboard_summary(subs);
    let totals = portfolio_totals(subs, portfolio.categories());
    let stats = aggregate_by_category(subs, portfolio.categories());
    let recommendations = recommend_budget_actions_with_total(
        &stats,
        totals.total_portfolio_monthly_cost,
        &settings.budget,
    );
    let renewals = upcoming_renewals(subs, today, settings.horizon_days)?;
    let sym = &settings.currency_symbol;

    println!();
    println!("╭─────────────────────────────────────────╮");
    println!("│         💳 Subscription Dashboard       │");
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  Subscriptions:   {}", summary.total_subscriptions);
    println!(
        "  Monthly Cost:    {}",
        format_currency(summary.total_monthly_cost, sym)
    );
    println!(
        "  Annual Cost:     {}",
        format_currency(summary.total_annualized_cost, sym)
    );
    if let Some(top) = &summary.highest_subscription {
        println!(
            "  Most Expensive:  {} ({}/yr)",
            top.service_name(),
            format_currency(top.annualized_cost, sym)
        );
    }
    if totals.uncategorized_count > 0 {
        println!("  🏷️  Uncategorized: {}", totals.uncategorized_count);
    }
    println!();

    println!(
        "  📅 Renewing in {} days: {}",
        settings.horizon_days,
        renewals.len()
    );
    for renewal in renewals.iter().take(5) {
        println!(
            "     {}  {}",
            renewal.next_renewal_date,
            renewal.subscription.service_name()
        );
    }
    if renewals.len() > 5 {
        println!("     ... and {} more", renewals.len() - 5);
    }
    println!();

    if recommendations.is_empty() {
        println!("  ✅ Spending is within budget.");
    } else {
        for rec in &recommendations {
            let icon = match rec.level {
                RecommendationLevel::Warning => "⚠️ ",
                RecommendationLevel::Info => "ℹ️ ",
                RecommendationLevel::Suggestion => "💡",
            };
            println!("  {} {}", icon, rec.title);
            println!("     {}", rec.message);
        }
    }
    println!();

    if renewals.len() > 5 {
        println!("  Run 'subtrack renewals' for the full list.");
    }

    Ok(())
}
