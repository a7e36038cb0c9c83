//! Usage aggregation over a billing period
//!
//! Sums the resolved durations of all work entries whose anchor falls
//! inside a resolved billing period. A single damaged entry (end before
//! start) is excluded and reported, never allowed to corrupt a
//! customer's total. The sum is order-independent and, for a fixed
//! `now` and entry set, idempotent.

use crate::duration::resolve_duration;
use crate::period::BillingPeriod;
use crate::types::{EmergencyTicket, EntryId, WorkEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Aggregated consumption for one customer and period
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageTotal {
    /// Minutes of work inside the period
    pub used_minutes: u64,
    /// Entries excluded because their duration could not be resolved
    pub skipped_entries: Vec<EntryId>,
}

/// Sum the durations of all entries anchored inside the period
///
/// Entries outside the window are ignored. Entries the duration
/// resolver rejects are logged as warnings and collected in
/// `skipped_entries`; the remaining entries still produce a valid
/// total. Open entries contribute their elapsed time as of `now`.
///
/// # Examples
///
/// ```
/// use constat::aggregation::aggregate_usage;
/// use constat::period::resolve_period;
/// use constat::types::{TimeSpan, WorkEntry};
/// use chrono::Utc;
///
/// let period = resolve_period(5, 2024, TimeSpan::Monthly);
/// let entries: Vec<WorkEntry> = vec![];
/// let total = aggregate_usage(&period, &entries, Utc::now());
/// assert_eq!(total.used_minutes, 0);
/// ```
pub fn aggregate_usage<'a, I>(period: &BillingPeriod, entries: I, now: DateTime<Utc>) -> UsageTotal
where
    I: IntoIterator<Item = &'a WorkEntry>,
{
    let mut total = UsageTotal::default();

    for entry in entries {
        if !period.contains(&entry.anchor()) {
            continue;
        }
        match resolve_duration(entry, now) {
            Ok(minutes) => total.used_minutes += minutes,
            Err(e) => {
                warn!("Excluding work entry {} from total: {}", entry.id, e);
                total.skipped_entries.push(entry.id);
            }
        }
    }

    total
}

/// Emergency tickets raised inside the period
///
/// Tickets never count against the contingent; this is the same period
/// filter applied for informational reporting only.
pub fn tickets_in_period<'a>(
    period: &BillingPeriod,
    tickets: &'a [EmergencyTicket],
) -> Vec<&'a EmergencyTicket> {
    tickets
        .iter()
        .filter(|ticket| period.contains(&ticket.datetime))
        .collect()
}
