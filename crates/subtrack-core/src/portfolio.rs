//! In-memory subscription and category collection
//!
//! Holds the records fetched from the backend and applies the create,
//! update and delete lifecycle locally. Every subscription stored here has
//! already passed validation and carries freshly derived costs.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::ingest::{ingest_snapshot, RawCategory, RawSubscription, Snapshot};
use crate::models::{BillingCycle, Category, NormalizedSubscription, Subscription, UNCATEGORIZED};

/// User-submitted fields for a new or edited subscription
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriptionDraft {
    pub service_name: String,
    pub cost: f64,
    pub billing_cycle: BillingCycle,
    pub category_id: Option<i64>,
    pub auto_renews: bool,
    pub start_date: NaiveDate,
}

impl SubscriptionDraft {
    fn into_subscription(self, id: i64) -> Result<NormalizedSubscription> {
        let service_name = self.service_name.trim();
        if service_name.is_empty() {
            return Err(Error::InvalidData("service name cannot be empty".to_string()));
        }
        NormalizedSubscription::new(Subscription {
            id,
            service_name: service_name.to_string(),
            cost: self.cost,
            billing_cycle: self.billing_cycle,
            category_id: self.category_id,
            auto_renews: self.auto_renews,
            start_date: self.start_date,
        })
    }
}

/// Ids are never handed out twice: a deleted category id may still be
/// referenced by subscriptions, and a deleted subscription id may still be
/// known to the user.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    categories: Vec<Category>,
    subscriptions: Vec<NormalizedSubscription>,
    /// Highest category id ever assigned or referenced
    last_category_id: i64,
    /// Highest subscription id ever assigned
    last_subscription_id: i64,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from already-validated records
    pub fn from_parts(
        categories: Vec<Category>,
        subscriptions: Vec<NormalizedSubscription>,
    ) -> Self {
        let last_category_id = categories
            .iter()
            .map(|c| c.id)
            .chain(subscriptions.iter().filter_map(|s| s.subscription.category_id))
            .max()
            .unwrap_or(0)
            .max(0);
        let last_subscription_id = subscriptions
            .iter()
            .map(|s| s.id())
            .max()
            .unwrap_or(0)
            .max(0);
        Self {
            categories,
            subscriptions,
            last_category_id,
            last_subscription_id,
        }
    }

    /// Validate a snapshot and restore its id high-water marks
    pub fn from_snapshot(snapshot: &Snapshot) -> Result<Self> {
        let (categories, subscriptions) = ingest_snapshot(snapshot)?;
        let mut portfolio = Self::from_parts(categories, subscriptions);
        if let Some(last) = snapshot.last_category_id {
            portfolio.last_category_id = portfolio.last_category_id.max(last);
        }
        if let Some(last) = snapshot.last_subscription_id {
            portfolio.last_subscription_id = portfolio.last_subscription_id.max(last);
        }
        Ok(portfolio)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn subscriptions(&self) -> &[NormalizedSubscription] {
        &self.subscriptions
    }

    /// Resolve a category reference to its display name
    pub fn category_name(&self, id: Option<i64>) -> &str {
        category_name(&self.categories, id)
    }

    pub fn get_category(&self, id: i64) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Find a category by id or (case-insensitive) name
    pub fn find_category(&self, name_or_id: &str) -> Option<&Category> {
        if let Ok(id) = name_or_id.trim().parse::<i64>() {
            if let Some(cat) = self.get_category(id) {
                return Some(cat);
            }
        }
        self.categories
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name_or_id.trim()))
    }

    pub fn get_subscription(&self, id: i64) -> Option<&NormalizedSubscription> {
        self.subscriptions.iter().find(|s| s.id() == id)
    }

    fn validate_category_name(&self, name: &str, except_id: Option<i64>) -> Result<String> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("category name cannot be empty".to_string()));
        }
        if self
            .categories
            .iter()
            .any(|c| Some(c.id) != except_id && c.name.eq_ignore_ascii_case(name))
        {
            return Err(Error::InvalidData(format!(
                "category already exists: {}",
                name
            )));
        }
        Ok(name.to_string())
    }

    /// Add a category, returning its id
    pub fn add_category(&mut self, name: &str) -> Result<i64> {
        let name = self.validate_category_name(name, None)?;
        let id = next_id(self.last_category_id)?;
        self.categories.push(Category { id, name });
        self.last_category_id = id;
        Ok(id)
    }

    pub fn rename_category(&mut self, id: i64, name: &str) -> Result<()> {
        let name = self.validate_category_name(name, Some(id))?;
        let category = self
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| Error::NotFound(format!("category {}", id)))?;
        category.name = name;
        Ok(())
    }

    /// Delete a category, returning how many subscriptions still reference it
    ///
    /// Those subscriptions keep the dangling id and display as
    /// "Uncategorized" from now on.
    pub fn delete_category(&mut self, id: i64) -> Result<usize> {
        let before = self.categories.len();
        self.categories.retain(|c| c.id != id);
        if self.categories.len() == before {
            return Err(Error::NotFound(format!("category {}", id)));
        }
        Ok(self
            .subscriptions
            .iter()
            .filter(|s| s.subscription.category_id == Some(id))
            .count())
    }

    /// Add a subscription, returning its id
    pub fn add_subscription(&mut self, draft: SubscriptionDraft) -> Result<i64> {
        let id = next_id(self.last_subscription_id)?;
        let normalized = draft.into_subscription(id)?;
        self.subscriptions.push(normalized);
        self.last_subscription_id = id;
        Ok(id)
    }

    /// Replace a subscription's fields in place, keeping its id and position
    pub fn update_subscription(&mut self, id: i64, draft: SubscriptionDraft) -> Result<()> {
        let slot = self
            .subscriptions
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or_else(|| Error::NotFound(format!("subscription {}", id)))?;
        *slot = draft.into_subscription(id)?;
        Ok(())
    }

    pub fn delete_subscription(&mut self, id: i64) -> Result<()> {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id() != id);
        if self.subscriptions.len() == before {
            return Err(Error::NotFound(format!("subscription {}", id)));
        }
        Ok(())
    }

    /// Convert back to wire shape for saving
    pub fn to_snapshot(&self) -> Snapshot {
        Snapshot {
            categories: self.categories.iter().map(RawCategory::from).collect(),
            subscriptions: self
                .subscriptions
                .iter()
                .map(|s| RawSubscription::from(&s.subscription))
                .collect(),
            last_category_id: Some(self.last_category_id),
            last_subscription_id: Some(self.last_subscription_id),
        }
    }
}

fn next_id(last: i64) -> Result<i64> {
    last.checked_add(1)
        .ok_or_else(|| Error::InvalidData("id space exhausted".to_string()))
}

/// Resolve a category reference against a category list
pub fn category_name(categories: &[Category], id: Option<i64>) -> &str {
    id.and_then(|id| categories.iter().find(|c| c.id == id))
        .map(|c| c.name.as_str())
        .unwrap_or(UNCATEGORIZED)
}
