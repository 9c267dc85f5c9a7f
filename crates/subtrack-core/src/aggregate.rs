//! Category breakdown, portfolio totals and budget recommendations
//!
//! Everything is recomputed from scratch on each call. Collections are
//! small (tens to low hundreds of records), so there is no incremental
//! bookkeeping to keep in sync.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::{
    BudgetThresholds, Category, CategoryStat, DashboardSummary, NormalizedSubscription,
    PortfolioTotals, Recommendation, RecommendationLevel,
};

/// Per-category statistics, one entry per category
///
/// Categories without members are included with zero counts. Ordered by
/// annualized total (highest first), ties broken by name ascending.
/// Subscriptions whose category is unset or dangling are left out here;
/// see [`portfolio_totals`].
pub fn aggregate_by_category(
    subscriptions: &[NormalizedSubscription],
    categories: &[Category],
) -> Vec<CategoryStat> {
    let mut index: HashMap<i64, usize> = HashMap::with_capacity(categories.len());
    let mut stats: Vec<CategoryStat> = Vec::with_capacity(categories.len());

    for cat in categories {
        if index.contains_key(&cat.id) {
            continue;
        }
        index.insert(cat.id, stats.len());
        stats.push(CategoryStat {
            category_id: cat.id,
            name: cat.name.clone(),
            subscription_count: 0,
            total_monthly_cost: 0.0,
            total_annualized_cost: 0.0,
            member_subscriptions: Vec::new(),
        });
    }

    for sub in subscriptions {
        let Some(&slot) = sub
            .subscription
            .category_id
            .and_then(|id| index.get(&id))
        else {
            continue;
        };
        let stat = &mut stats[slot];
        stat.subscription_count += 1;
        stat.total_monthly_cost += sub.monthly_cost;
        stat.total_annualized_cost += sub.annualized_cost;
        stat.member_subscriptions.push(sub.clone());
    }

    stats.sort_by(|a, b| {
        b.total_annualized_cost
            .total_cmp(&a.total_annualized_cost)
            .then_with(|| a.name.cmp(&b.name))
    });

    stats
}

/// Totals over every subscription regardless of category
pub fn portfolio_totals(
    subscriptions: &[NormalizedSubscription],
    categories: &[Category],
) -> PortfolioTotals {
    let mut totals = PortfolioTotals::default();
    for sub in subscriptions {
        totals.total_portfolio_monthly_cost += sub.monthly_cost;
        totals.total_portfolio_annualized_cost += sub.annualized_cost;

        let resolved = sub
            .subscription
            .category_id
            .is_some_and(|id| categories.iter().any(|c| c.id == id));
        if !resolved {
            totals.uncategorized_count += 1;
        }
    }
    totals
}

/// Headline numbers for the dashboard
pub fn dashboard_summary(subscriptions: &[NormalizedSubscription]) -> DashboardSummary {
    let mut highest: Option<&NormalizedSubscription> = None;
    for sub in subscriptions {
        match highest {
            Some(current)
                if sub.annualized_cost.total_cmp(&current.annualized_cost)
                    != Ordering::Greater => {}
            _ => highest = Some(sub),
        }
    }

    DashboardSummary {
        total_subscriptions: subscriptions.len() as i64,
        total_monthly_cost: subscriptions.iter().map(|s| s.monthly_cost).sum(),
        total_annualized_cost: subscriptions.iter().map(|s| s.annualized_cost).sum(),
        highest_subscription: highest.cloned(),
    }
}

/// Advisory items derived from category statistics
///
/// The portfolio figure is the sum of the category totals passed in, so
/// callers wanting uncategorized spend included should use
/// [`recommend_budget_actions_with_total`]. Order is warning, info,
/// suggestion; conditions that do not hold produce nothing.
pub fn recommend_budget_actions(
    stats: &[CategoryStat],
    thresholds: &BudgetThresholds,
) -> Vec<Recommendation> {
    let total: f64 = stats.iter().map(|s| s.total_monthly_cost).sum();
    recommend_budget_actions_with_total(stats, total, thresholds)
}

/// Same as [`recommend_budget_actions`] with an explicit portfolio monthly total
pub fn recommend_budget_actions_with_total(
    stats: &[CategoryStat],
    portfolio_monthly_total: f64,
    thresholds: &BudgetThresholds,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();

    if portfolio_monthly_total > thresholds.monthly_portfolio_ceiling {
        recommendations.push(Recommendation {
            level: RecommendationLevel::Warning,
            title: "Monthly spending over budget".to_string(),
            message: format!(
                "Subscriptions cost {:.2} per month, above the {:.2} ceiling",
                portfolio_monthly_total, thresholds.monthly_portfolio_ceiling
            ),
            count: 1,
        });
    }

    let heavy_categories = stats
        .iter()
        .filter(|s| s.total_monthly_cost > thresholds.per_category_ceiling)
        .count() as i64;
    if heavy_categories > 0 {
        recommendations.push(Recommendation {
            level: RecommendationLevel::Info,
            title: "High-cost categories".to_string(),
            message: format!(
                "{} {} over {:.2} per month",
                heavy_categories,
                if heavy_categories == 1 {
                    "category is"
                } else {
                    "categories are"
                },
                thresholds.per_category_ceiling
            ),
            count: heavy_categories,
        });
    }

    let single_expensive = stats
        .iter()
        .filter(|s| {
            s.member_subscriptions.len() == 1
                && s.member_subscriptions[0].monthly_cost > thresholds.single_item_ceiling
        })
        .count() as i64;
    if single_expensive > 0 {
        recommendations.push(Recommendation {
            level: RecommendationLevel::Suggestion,
            title: "Review single expensive subscriptions".to_string(),
            message: format!(
                "{} {} a single subscription costing over {:.2} per month",
                single_expensive,
                if single_expensive == 1 {
                    "category holds"
                } else {
                    "categories hold"
                },
                thresholds.single_item_ceiling
            ),
            count: single_expensive,
        });
    }

    recommendations
}
