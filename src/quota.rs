//! Quota comparison and status tiers
//!
//! Combines a customer's budget with aggregated consumption to produce
//! remaining minutes, a usage percentage, and the status tier that
//! drives dashboard coloring. Percentage is consumption-based
//! (used/total); a zero budget is handled as a defined sentinel, never
//! a division.

use crate::types::StatusTier;
use serde::{Deserialize, Serialize};

/// Budget versus consumption for one customer and period
///
/// # Examples
/// ```
/// use constat::quota::compare_quota;
/// use constat::types::StatusTier;
///
/// let report = compare_quota(600, 90);
/// assert_eq!(report.remaining_minutes, 510);
/// assert_eq!(report.usage_percentage, Some(15.0));
/// assert_eq!(report.status_tier, StatusTier::Ok);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuotaReport {
    /// Budget minus consumption; negative on overrun
    pub remaining_minutes: i64,
    /// Consumed share of the budget in percent. `None` when the budget
    /// is zero but minutes were consumed; the ratio is undefined and
    /// callers display "over budget" instead of a number.
    pub usage_percentage: Option<f64>,
    /// Tier derived from the percentage
    pub status_tier: StatusTier,
}

/// Compare consumption against the budget
///
/// Tier thresholds on the usage percentage: `ok` up to 75, `warning`
/// above 75 up to 100, `danger` above 100. Any consumption against a
/// zero budget is an overrun and therefore `danger`.
pub fn compare_quota(total_budget_minutes: u64, used_minutes: u64) -> QuotaReport {
    let remaining_minutes = total_budget_minutes as i64 - used_minutes as i64;

    if total_budget_minutes == 0 {
        return if used_minutes == 0 {
            QuotaReport {
                remaining_minutes: 0,
                usage_percentage: Some(0.0),
                status_tier: StatusTier::Ok,
            }
        } else {
            QuotaReport {
                remaining_minutes,
                usage_percentage: None,
                status_tier: StatusTier::Danger,
            }
        };
    }

    let percentage = used_minutes as f64 / total_budget_minutes as f64 * 100.0;
    QuotaReport {
        remaining_minutes,
        usage_percentage: Some(percentage),
        status_tier: tier_for(percentage),
    }
}

fn tier_for(percentage: f64) -> StatusTier {
    if percentage > 100.0 {
        StatusTier::Danger
    } else if percentage > 75.0 {
        StatusTier::Warning
    } else {
        StatusTier::Ok
    }
}

/// Format minutes as the "2h 30min" display form used on reports
///
/// Zero components are omitted, overruns get a leading minus sign, and
/// plain zero renders as "0min".
///
/// # Examples
/// ```
/// use constat::quota::format_minutes;
///
/// assert_eq!(format_minutes(150), "2h 30min");
/// assert_eq!(format_minutes(-65), "-1h 5min");
/// assert_eq!(format_minutes(0), "0min");
/// ```
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let hours = minutes.abs() / 60;
    let mins = minutes.abs() % 60;
    match (hours, mins) {
        (0, 0) => "0min".to_string(),
        (h, 0) => format!("{sign}{h}h"),
        (0, m) => format!("{sign}{m}min"),
        (h, m) => format!("{sign}{h}h {m}min"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_under_budget() {
        let report = compare_quota(600, 90);
        assert_eq!(report.remaining_minutes, 510);
        assert_eq!(report.usage_percentage, Some(15.0));
        assert_eq!(report.status_tier, StatusTier::Ok);
    }

    #[test]
    fn test_tier_boundaries() {
        // Exactly 75% is still ok, exactly 100% is still warning.
        assert_eq!(compare_quota(100, 75).status_tier, StatusTier::Ok);
        assert_eq!(compare_quota(100, 76).status_tier, StatusTier::Warning);
        assert_eq!(compare_quota(100, 100).status_tier, StatusTier::Warning);
        assert_eq!(compare_quota(100, 101).status_tier, StatusTier::Danger);
    }

    #[test]
    fn test_overrun_goes_negative() {
        let report = compare_quota(60, 90);
        assert_eq!(report.remaining_minutes, -30);
        assert_eq!(report.usage_percentage, Some(150.0));
        assert_eq!(report.status_tier, StatusTier::Danger);
    }

    #[test]
    fn test_zero_budget_zero_usage() {
        let report = compare_quota(0, 0);
        assert_eq!(report.usage_percentage, Some(0.0));
        assert_eq!(report.status_tier, StatusTier::Ok);
    }

    #[test]
    fn test_zero_budget_with_usage_is_danger_without_dividing() {
        let report = compare_quota(0, 5);
        assert_eq!(report.remaining_minutes, -5);
        assert_eq!(report.usage_percentage, None);
        assert_eq!(report.status_tier, StatusTier::Danger);
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "0min");
        assert_eq!(format_minutes(45), "45min");
        assert_eq!(format_minutes(120), "2h");
        assert_eq!(format_minutes(150), "2h 30min");
        assert_eq!(format_minutes(-30), "-30min");
        assert_eq!(format_minutes(-65), "-1h 5min");
    }
}
