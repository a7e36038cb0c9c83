//! Report assembly
//!
//! Wires the period resolver, usage aggregator, and quota comparator
//! into the per-customer report consumed by the rendering and alerting
//! layers, plus the fleet-wide summary with status counts.

use crate::aggregation::{UsageTotal, aggregate_usage};
use crate::period::{BillingPeriod, resolve_period};
use crate::quota::compare_quota;
use crate::types::{Customer, CustomerId, EntryId, StatusTier, WorkEntry};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Contingent usage report for one customer and reference period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContingentReport {
    /// Customer identifier
    pub customer_id: CustomerId,
    /// External customer number
    pub customer_number: String,
    /// Customer display name
    pub customer_name: String,
    /// Window the consumption was aggregated over
    pub period: BillingPeriod,
    /// Total recurring budget in minutes
    pub budget_minutes: u64,
    /// Minutes of work inside the period
    pub used_minutes: u64,
    /// Budget minus consumption; negative on overrun
    pub remaining_minutes: i64,
    /// Consumed share of the budget, `None` when not meaningful
    pub usage_percentage: Option<f64>,
    /// Tier driving dashboard coloring
    pub status_tier: StatusTier,
    /// Entries excluded because their duration could not be resolved
    pub skipped_entries: Vec<EntryId>,
}

/// Build the usage report for one customer
///
/// Resolves the aggregation window from the customer's time span,
/// sums the customer's entries inside it, and compares the result
/// against the budget. Entries belonging to other customers are
/// ignored. `now` anchors any still-running entries and must come from
/// the caller.
pub fn contingent_report(
    customer: &Customer,
    entries: &[WorkEntry],
    month: u32,
    year: i32,
    now: DateTime<Utc>,
) -> ContingentReport {
    let period = resolve_period(month, year, customer.time_span);

    let UsageTotal {
        used_minutes,
        skipped_entries,
    } = aggregate_usage(
        &period,
        entries.iter().filter(|entry| entry.customer_id == customer.id),
        now,
    );

    let quota = compare_quota(customer.total_budget_minutes(), used_minutes);

    ContingentReport {
        customer_id: customer.id,
        customer_number: customer.customer_number.clone(),
        customer_name: customer.name.clone(),
        period,
        budget_minutes: customer.total_budget_minutes(),
        used_minutes,
        remaining_minutes: quota.remaining_minutes,
        usage_percentage: quota.usage_percentage,
        status_tier: quota.status_tier,
        skipped_entries,
    }
}

/// Fleet-wide counts of customers per status tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    /// Customers at or below 75% consumption
    pub ok: usize,
    /// Customers above 75% consumption
    pub warning: usize,
    /// Customers over budget
    pub danger: usize,
}

impl StatusCounts {
    /// Tally tiers over a set of reports
    pub fn from_reports(reports: &[ContingentReport]) -> Self {
        let mut counts = Self::default();
        for report in reports {
            match report.status_tier {
                StatusTier::Ok => counts.ok += 1,
                StatusTier::Warning => counts.warning += 1,
                StatusTier::Danger => counts.danger += 1,
            }
        }
        counts
    }
}

/// All customers' reports for one reference period
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSummary {
    /// Per-customer reports, most critical first
    pub reports: Vec<ContingentReport>,
    /// Tier counts over the fleet
    pub counts: StatusCounts,
}

/// Build reports for every customer and tally the tiers
///
/// Reports are ordered danger, warning, ok, then by customer name, so
/// the customers needing attention lead the output.
pub fn fleet_summary(
    customers: &[Customer],
    entries: &[WorkEntry],
    month: u32,
    year: i32,
    now: DateTime<Utc>,
) -> FleetSummary {
    let mut reports: Vec<ContingentReport> = customers
        .iter()
        .map(|customer| contingent_report(customer, entries, month, year, now))
        .collect();

    reports.sort_by(|a, b| {
        tier_rank(a.status_tier)
            .cmp(&tier_rank(b.status_tier))
            .then_with(|| a.customer_name.cmp(&b.customer_name))
    });

    let counts = StatusCounts::from_reports(&reports);
    FleetSummary { reports, counts }
}

fn tier_rank(tier: StatusTier) -> u8 {
    match tier {
        StatusTier::Danger => 0,
        StatusTier::Warning => 1,
        StatusTier::Ok => 2,
    }
}
