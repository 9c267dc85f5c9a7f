//! subtrack Core Library
//!
//! Subscription cost normalization and client-side query engine:
//! - Cost normalization across billing cycles
//! - Record ingestion and validation
//! - In-memory portfolio with create/update/delete
//! - Category breakdown, dashboard totals and budget recommendations
//! - Search, filter, sort and pagination of the subscription list
//! - Upcoming renewal selection
//! - Settings loaded from TOML

pub mod aggregate;
pub mod config;
pub mod error;
pub mod ingest;
pub mod models;
pub mod normalize;
pub mod portfolio;
pub mod query;
pub mod renewals;

pub use aggregate::{
    aggregate_by_category, dashboard_summary, portfolio_totals, recommend_budget_actions,
    recommend_budget_actions_with_total,
};
pub use config::Settings;
pub use error::{Error, Result};
pub use ingest::{
    ingest_category, ingest_snapshot, ingest_subscription, parse_date, parse_snapshot,
    RawCategory, RawSubscription, Snapshot,
};
pub use models::{
    BillingCycle, BudgetThresholds, Category, CategoryStat, DashboardSummary,
    NormalizedSubscription, PortfolioTotals, QueryState, Recommendation, RecommendationLevel,
    SortKey, Subscription, UpcomingRenewal, UNCATEGORIZED,
};
pub use normalize::{format_currency, normalize, round_currency, CostBreakdown};
pub use portfolio::{Portfolio, SubscriptionDraft};
pub use query::{evaluate, paginate, QueryResult};
pub use renewals::{next_renewal_date, upcoming_renewals};
