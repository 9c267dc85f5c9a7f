//! Cost normalization
//!
//! Converts a raw charge and its billing cycle into comparable monthly and
//! annual figures. Values stay at full `f64` precision; rounding to cents is
//! a presentation concern handled by [`round_currency`] and
//! [`format_currency`].

use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::BillingCycle;

/// Monthly-equivalent and annualized cost of one charge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub monthly_cost: f64,
    pub annualized_cost: f64,
}

/// Normalize `cost` charged once per `cycle`
pub fn normalize(cost: f64, cycle: BillingCycle) -> Result<CostBreakdown> {
    if !cost.is_finite() || cost <= 0.0 {
        return Err(Error::InvalidCost(cost));
    }

    let (monthly_cost, annualized_cost) = match cycle {
        BillingCycle::Monthly => (cost, cost * 12.0),
        BillingCycle::Quarterly => (cost / 3.0, cost * 4.0),
        BillingCycle::Yearly => (cost / 12.0, cost),
    };

    Ok(CostBreakdown {
        monthly_cost,
        annualized_cost,
    })
}

/// Normalize with the cycle given as text (form input, CLI flags)
pub fn normalize_str(cost: f64, cycle: &str) -> Result<CostBreakdown> {
    normalize(cost, cycle.parse()?)
}

/// Round to cents, half away from zero
pub fn round_currency(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Format an amount for display, e.g. `$1,234.50`
pub fn format_currency(amount: f64, symbol: &str) -> String {
    let rounded = round_currency(amount);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let fixed = format!("{:.2}", rounded.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}{}.{}", sign, symbol, grouped, cents)
}
