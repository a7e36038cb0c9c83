//! Billing period resolution
//!
//! Maps a reference month/year and a customer's calculation time span to
//! the inclusive month range the contingent is evaluated over. Quarter
//! boundaries are pure integer arithmetic; no calendar library is involved
//! beyond extracting month and year from entry anchors.
//!
//! # Examples
//!
//! ```
//! use constat::period::resolve_period;
//! use constat::types::TimeSpan;
//!
//! // May of a quarterly customer aggregates over April..June
//! let period = resolve_period(5, 2024, TimeSpan::Quarterly);
//! assert_eq!((period.start_month, period.end_month), (4, 6));
//! ```

use crate::types::TimeSpan;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive month range a report aggregates over
///
/// Quarters never span a year boundary in this model: month 12 resolves
/// to quarter 4, October through December of the same year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// First month of the window (1-12)
    pub start_month: u32,
    /// Last month of the window (1-12), inclusive
    pub end_month: u32,
    /// Year the window lies in
    pub year: i32,
}

impl BillingPeriod {
    /// Whether an anchor instant falls inside the window
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        at.year() == self.year && (self.start_month..=self.end_month).contains(&at.month())
    }

    /// Human-readable heading for the window, "May 2024" or "Q2 2024"
    pub fn label(&self) -> String {
        if self.start_month == self.end_month {
            format!("{} {}", month_name(self.start_month), self.year)
        } else {
            format!("Q{} {}", quarter_of(self.start_month), self.year)
        }
    }
}

/// Calendar quarter (1-4) a month belongs to
pub fn quarter_of(month: u32) -> u32 {
    month.div_ceil(3)
}

/// Resolve the aggregation window for a reference month and year
///
/// `month` is assumed already validated to 1-12 by the caller. Pure
/// function, no error conditions.
pub fn resolve_period(month: u32, year: i32, time_span: TimeSpan) -> BillingPeriod {
    match time_span {
        TimeSpan::Monthly => BillingPeriod {
            start_month: month,
            end_month: month,
            year,
        },
        TimeSpan::Quarterly => {
            let quarter = quarter_of(month);
            BillingPeriod {
                start_month: (quarter - 1) * 3 + 1,
                end_month: quarter * 3,
                year,
            }
        }
    }
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January",
        2 => "February",
        3 => "March",
        4 => "April",
        5 => "May",
        6 => "June",
        7 => "July",
        8 => "August",
        9 => "September",
        10 => "October",
        11 => "November",
        _ => "December",
    }
}
