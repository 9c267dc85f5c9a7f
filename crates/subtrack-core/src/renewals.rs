//! Upcoming renewal selection
//!
//! Renewal dates are anchored to the start date and advanced in whole
//! calendar months, so a subscription started on the 31st renews on the last
//! day of shorter months and returns to the 31st afterwards.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::error::{Error, Result};
use crate::models::{BillingCycle, NormalizedSubscription, UpcomingRenewal};

/// Date of the `periods`-th renewal after `start`
fn renewal_after(start: NaiveDate, cycle: BillingCycle, periods: u32) -> Result<NaiveDate> {
    periods
        .checked_mul(cycle.months())
        .and_then(|months| start.checked_add_months(Months::new(months)))
        .ok_or_else(|| Error::InvalidDate(format!("renewal of {} overflows", start)))
}

/// First renewal on or after `now`
///
/// A start date that is still in the future is itself the next renewal.
pub fn next_renewal_date(
    start: NaiveDate,
    cycle: BillingCycle,
    now: NaiveDate,
) -> Result<NaiveDate> {
    if start >= now {
        return Ok(start);
    }

    let elapsed_months =
        (now.year() - start.year()) as i64 * 12 + now.month() as i64 - start.month() as i64;
    let period = cycle.months() as i64;
    // Begin one period early so the loop below never skips the answer
    let mut periods = u32::try_from((elapsed_months / period - 1).max(0))
        .map_err(|_| Error::InvalidDate(format!("{} is too far from {}", start, now)))?;

    loop {
        let candidate = renewal_after(start, cycle, periods)?;
        if candidate >= now {
            return Ok(candidate);
        }
        periods += 1;
    }
}

/// Auto-renewing subscriptions whose next renewal is within `horizon_days`
///
/// Sorted soonest first, ties broken by service name.
pub fn upcoming_renewals(
    subscriptions: &[NormalizedSubscription],
    now: NaiveDate,
    horizon_days: u32,
) -> Result<Vec<UpcomingRenewal>> {
    let horizon_end = now
        .checked_add_days(Days::new(horizon_days as u64))
        .ok_or_else(|| Error::InvalidDate(format!("{} + {} days", now, horizon_days)))?;

    let mut renewals = Vec::new();
    for sub in subscriptions {
        if !sub.subscription.auto_renews {
            continue;
        }
        let next = next_renewal_date(
            sub.subscription.start_date,
            sub.subscription.billing_cycle,
            now,
        )?;
        if next <= horizon_end {
            renewals.push(UpcomingRenewal {
                subscription: sub.clone(),
                next_renewal_date: next,
            });
        }
    }

    renewals.sort_by(|a, b| {
        a.next_renewal_date
            .cmp(&b.next_renewal_date)
            .then_with(|| {
                a.subscription
                    .service_name()
                    .cmp(b.subscription.service_name())
            })
    });

    Ok(renewals)
}
