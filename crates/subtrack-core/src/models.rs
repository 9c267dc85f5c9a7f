//! Domain models for subtrack

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::normalize::{normalize, CostBreakdown};

/// Display name for subscriptions without a resolvable category
pub const UNCATEGORIZED: &str = "Uncategorized";

/// A user-defined grouping for subscriptions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Subscription billing cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BillingCycle {
    Monthly,
    Quarterly,
    Yearly,
}

impl BillingCycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Yearly => "Yearly",
        }
    }

    /// Length of one billing period in calendar months
    pub fn months(&self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Quarterly => 3,
            Self::Yearly => 12,
        }
    }

    pub fn all() -> &'static [BillingCycle] {
        &[Self::Monthly, Self::Quarterly, Self::Yearly]
    }
}

impl std::str::FromStr for BillingCycle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            "yearly" | "annual" | "annually" => Ok(Self::Yearly),
            _ => Err(Error::InvalidCycle(s.to_string())),
        }
    }
}

impl std::fmt::Display for BillingCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recurring expense as entered by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    pub id: i64,
    pub service_name: String,
    /// Charge per billing period, always > 0
    pub cost: f64,
    pub billing_cycle: BillingCycle,
    /// May reference a category that no longer exists
    pub category_id: Option<i64>,
    pub auto_renews: bool,
    pub start_date: NaiveDate,
}

/// A subscription plus its derived monthly and annual cost
///
/// Costs are recomputed from `cost` and `billing_cycle` whenever the
/// record is built, so they can never drift from the source fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedSubscription {
    #[serde(flatten)]
    pub subscription: Subscription,
    pub monthly_cost: f64,
    pub annualized_cost: f64,
}

impl NormalizedSubscription {
    /// Normalize a subscription, rejecting a non-positive or non-finite cost
    pub fn new(subscription: Subscription) -> Result<Self> {
        let CostBreakdown {
            monthly_cost,
            annualized_cost,
        } = normalize(subscription.cost, subscription.billing_cycle)?;
        Ok(Self {
            subscription,
            monthly_cost,
            annualized_cost,
        })
    }

    pub fn id(&self) -> i64 {
        self.subscription.id
    }

    pub fn service_name(&self) -> &str {
        &self.subscription.service_name
    }
}

/// Field the query engine orders by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Most recent start date first
    #[default]
    StartDate,
    /// Highest raw cost first
    Cost,
    /// Highest annualized cost first
    AnnualizedCost,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StartDate => "start_date",
            Self::Cost => "cost",
            Self::AnnualizedCost => "annualized_cost",
        }
    }
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "start_date" | "date" => Ok(Self::StartDate),
            "cost" => Ok(Self::Cost),
            "annualized_cost" | "annual" => Ok(Self::AnnualizedCost),
            _ => Err(format!(
                "Unknown sort key: {} (valid: start_date, cost, annualized_cost)",
                s
            )),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Search, filter, sort and pagination inputs for a single view
///
/// Owned by the caller and passed by value into [`crate::query::evaluate`].
/// The setters that narrow or widen the matched set reset `page_index`
/// to 1, since the previous page may no longer exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryState {
    pub search_text: String,
    pub category_filter: Option<i64>,
    pub billing_cycle_filter: Option<BillingCycle>,
    pub sort_key: SortKey,
    pub page_index: i64,
    pub page_size: i64,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            category_filter: None,
            billing_cycle_filter: None,
            sort_key: SortKey::default(),
            page_index: 1,
            page_size: 10,
        }
    }
}

impl QueryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set search text (resets to page 1)
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self.page_index = 1;
        self
    }

    /// Set category filter (resets to page 1)
    pub fn category(mut self, id: Option<i64>) -> Self {
        self.category_filter = id;
        self.page_index = 1;
        self
    }

    /// Set billing cycle filter (resets to page 1)
    pub fn billing_cycle(mut self, cycle: Option<BillingCycle>) -> Self {
        self.billing_cycle_filter = cycle;
        self.page_index = 1;
        self
    }

    pub fn sort_by(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }

    pub fn page(mut self, index: i64) -> Self {
        self.page_index = index;
        self
    }

    /// Set page size (resets to page 1)
    pub fn page_size(mut self, size: i64) -> Self {
        self.page_size = size;
        self.page_index = 1;
        self
    }
}

/// Aggregate figures for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStat {
    pub category_id: i64,
    pub name: String,
    pub subscription_count: i64,
    pub total_monthly_cost: f64,
    pub total_annualized_cost: f64,
    /// Members in input order
    pub member_subscriptions: Vec<NormalizedSubscription>,
}

/// Totals over every subscription, categorized or not
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PortfolioTotals {
    pub total_portfolio_monthly_cost: f64,
    pub total_portfolio_annualized_cost: f64,
    /// Subscriptions whose category is unset or dangling
    pub uncategorized_count: i64,
}

/// Headline figures for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_subscriptions: i64,
    pub total_monthly_cost: f64,
    pub total_annualized_cost: f64,
    /// Highest annualized cost; first one wins on ties
    pub highest_subscription: Option<NormalizedSubscription>,
}

/// Ceilings used to produce budget recommendations
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BudgetThresholds {
    pub monthly_portfolio_ceiling: f64,
    pub per_category_ceiling: f64,
    pub single_item_ceiling: f64,
}

impl Default for BudgetThresholds {
    fn default() -> Self {
        Self {
            monthly_portfolio_ceiling: 200.0,
            per_category_ceiling: 75.0,
            single_item_ceiling: 30.0,
        }
    }
}

/// How strongly a recommendation should be presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationLevel {
    Warning,
    Info,
    Suggestion,
}

impl RecommendationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Suggestion => "suggestion",
        }
    }
}

impl std::fmt::Display for RecommendationLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An advisory item produced from category statistics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub level: RecommendationLevel,
    pub title: String,
    pub message: String,
    /// Number of categories (or 1 for the portfolio) the item covers
    pub count: i64,
}

/// A subscription that renews inside the requested window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpcomingRenewal {
    pub subscription: NormalizedSubscription,
    pub next_renewal_date: NaiveDate,
}
