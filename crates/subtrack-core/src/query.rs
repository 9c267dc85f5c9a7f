//! Client-side query engine
//!
//! Produces a filtered, sorted view of the subscription collection for a
//! [`QueryState`]. The pipeline always runs in the same order:
//!
//! 1. search (service name or resolved category name, case-insensitive)
//! 2. category filter
//! 3. billing cycle filter
//! 4. stable sort, highest/most recent first
//!
//! Pagination is a separate step ([`paginate`], [`QueryResult::page`]) so the
//! full ordered view stays available for totals and export.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{Category, NormalizedSubscription, QueryState, SortKey, UNCATEGORIZED};

/// Filtered and sorted view for one query
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    /// Every matching record, in sort order
    pub items: Vec<NormalizedSubscription>,
    pub total_matched: i64,
    /// Always at least 1, even with no matches
    pub page_count: i64,
    pub page_size: i64,
}

impl QueryResult {
    /// Slice out one page, clamping an out-of-range index to the last page
    pub fn page(&self, page_index: i64) -> Result<&[NormalizedSubscription]> {
        let index = clamp_page_index(page_index, self.page_count);
        paginate(&self.items, index, self.page_size)
    }
}

/// Evaluate `query` against the full collection
pub fn evaluate(
    subscriptions: &[NormalizedSubscription],
    categories: &[Category],
    query: &QueryState,
) -> Result<QueryResult> {
    if query.page_size <= 0 {
        return Err(Error::InvalidPageSize(query.page_size));
    }

    let names: HashMap<i64, String> = categories
        .iter()
        .map(|c| (c.id, c.name.to_lowercase()))
        .collect();
    let needle = query.search_text.trim().to_lowercase();
    let uncategorized = UNCATEGORIZED.to_lowercase();

    let mut items: Vec<NormalizedSubscription> = subscriptions
        .iter()
        .filter(|s| {
            if needle.is_empty() {
                return true;
            }
            if s.subscription.service_name.to_lowercase().contains(&needle) {
                return true;
            }
            let category = s
                .subscription
                .category_id
                .and_then(|id| names.get(&id))
                .unwrap_or(&uncategorized);
            category.contains(&needle)
        })
        .filter(|s| match query.category_filter {
            Some(id) => s.subscription.category_id == Some(id),
            None => true,
        })
        .filter(|s| match query.billing_cycle_filter {
            Some(cycle) => s.subscription.billing_cycle == cycle,
            None => true,
        })
        .cloned()
        .collect();

    // sort_by is stable: equal keys keep input order
    items.sort_by(|a, b| compare_desc(a, b, query.sort_key));

    let total_matched = items.len() as i64;
    Ok(QueryResult {
        items,
        total_matched,
        page_count: page_count(total_matched, query.page_size)?,
        page_size: query.page_size,
    })
}

fn compare_desc(a: &NormalizedSubscription, b: &NormalizedSubscription, key: SortKey) -> Ordering {
    match key {
        SortKey::StartDate => b.subscription.start_date.cmp(&a.subscription.start_date),
        SortKey::Cost => b.subscription.cost.total_cmp(&a.subscription.cost),
        SortKey::AnnualizedCost => b.annualized_cost.total_cmp(&a.annualized_cost),
    }
}

/// `ceil(total / page_size)`, never less than 1
pub fn page_count(total: i64, page_size: i64) -> Result<i64> {
    if page_size <= 0 {
        return Err(Error::InvalidPageSize(page_size));
    }
    let total = total.max(0);
    let pages = total / page_size + i64::from(total % page_size != 0);
    Ok(pages.max(1))
}

/// Pull an over-range page index back to the last page
pub fn clamp_page_index(page_index: i64, page_count: i64) -> i64 {
    page_index.clamp(1, page_count.max(1))
}

/// Slice `[(page_index-1)*page_size, page_index*page_size)` out of `items`
///
/// An index past the last page yields an empty slice, not an error. Callers
/// should reset to page 1 whenever the matched set changes.
pub fn paginate<T>(items: &[T], page_index: i64, page_size: i64) -> Result<&[T]> {
    if page_size <= 0 {
        return Err(Error::InvalidPageSize(page_size));
    }
    if page_index < 1 {
        return Err(Error::InvalidPageIndex(page_index));
    }

    let start = (page_index - 1).saturating_mul(page_size);
    let len = items.len() as i64;
    if start >= len {
        return Ok(&[]);
    }
    let end = start.saturating_add(page_size).min(len);
    Ok(&items[start as usize..end as usize])
}
