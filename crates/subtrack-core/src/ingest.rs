//! Record ingestion
//!
//! Validates raw records as the backend returns them before they enter the
//! engine. Bad values are rejected, never clamped or coerced.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::models::{BillingCycle, Category, NormalizedSubscription, Subscription};

/// A category record in backend wire shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawCategory {
    pub id: i64,
    pub name: String,
}

/// A subscription record in backend wire shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSubscription {
    pub id: i64,
    pub service_name: String,
    pub cost: f64,
    pub billing_cycle: String,
    #[serde(default, alias = "category_id")]
    pub category: Option<i64>,
    #[serde(default = "default_auto_renews")]
    pub auto_renews: bool,
    pub start_date: String,
}

fn default_auto_renews() -> bool {
    true
}

impl From<&Subscription> for RawSubscription {
    fn from(sub: &Subscription) -> Self {
        Self {
            id: sub.id,
            service_name: sub.service_name.clone(),
            cost: sub.cost,
            billing_cycle: sub.billing_cycle.as_str().to_string(),
            category: sub.category_id,
            auto_renews: sub.auto_renews,
            start_date: sub.start_date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<&Category> for RawCategory {
    fn from(cat: &Category) -> Self {
        Self {
            id: cat.id,
            name: cat.name.clone(),
        }
    }
}

/// The full record set as fetched from the backend
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub categories: Vec<RawCategory>,
    #[serde(default)]
    pub subscriptions: Vec<RawSubscription>,
    /// Highest category id ever assigned; deleted ids stay retired
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_category_id: Option<i64>,
    /// Highest subscription id ever assigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_subscription_id: Option<i64>,
}

/// Parse a `YYYY-MM-DD` date (a trailing time component is ignored)
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let trimmed = s.trim();
    let date_part = trimmed.split('T').next().unwrap_or(trimmed);
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Validate a category record
pub fn ingest_category(raw: &RawCategory) -> Result<Category> {
    let name = raw.name.trim();
    if name.is_empty() {
        return Err(Error::InvalidData(format!(
            "category {} has an empty name",
            raw.id
        )));
    }
    Ok(Category {
        id: raw.id,
        name: name.to_string(),
    })
}

/// Validate a subscription record and derive its costs
pub fn ingest_subscription(raw: &RawSubscription) -> Result<NormalizedSubscription> {
    let service_name = raw.service_name.trim();
    if service_name.is_empty() {
        return Err(Error::InvalidData(format!(
            "subscription {} has an empty service name",
            raw.id
        )));
    }

    let billing_cycle: BillingCycle = raw.billing_cycle.parse()?;
    let start_date = parse_date(&raw.start_date)?;

    NormalizedSubscription::new(Subscription {
        id: raw.id,
        service_name: service_name.to_string(),
        cost: raw.cost,
        billing_cycle,
        category_id: raw.category,
        auto_renews: raw.auto_renews,
        start_date,
    })
}

/// Validate every record in a snapshot
///
/// The first invalid record fails the whole load. Field errors come back as
/// [`Error::Record`] so the record id travels with the original error.
pub fn ingest_snapshot(
    snapshot: &Snapshot,
) -> Result<(Vec<Category>, Vec<NormalizedSubscription>)> {
    let mut categories = Vec::with_capacity(snapshot.categories.len());
    for raw in &snapshot.categories {
        let category = ingest_category(raw)?;
        if categories
            .iter()
            .any(|c: &Category| c.id == category.id || c.name.eq_ignore_ascii_case(&category.name))
        {
            return Err(Error::InvalidData(format!(
                "duplicate category {} ({})",
                category.id, category.name
            )));
        }
        categories.push(category);
    }

    let mut subscriptions = Vec::with_capacity(snapshot.subscriptions.len());
    for raw in &snapshot.subscriptions {
        let normalized = ingest_subscription(raw).map_err(|e| match e {
            Error::InvalidData(msg) => Error::InvalidData(msg),
            other => Error::Record {
                id: raw.id,
                source: Box::new(other),
            },
        })?;
        if subscriptions
            .iter()
            .any(|s: &NormalizedSubscription| s.id() == normalized.id())
        {
            return Err(Error::InvalidData(format!(
                "duplicate subscription id {}",
                raw.id
            )));
        }
        subscriptions.push(normalized);
    }

    Ok((categories, subscriptions))
}

/// Parse and validate a JSON snapshot
pub fn parse_snapshot(json: &str) -> Result<(Vec<Category>, Vec<NormalizedSubscription>)> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    ingest_snapshot(&snapshot)
}
