//! Core domain types for constat
//!
//! This module contains the fundamental types used throughout the constat
//! library. These types provide strong typing for common concepts like
//! customer ids, budgets, status tiers, and the three historical shapes a
//! work entry's duration can take.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strongly-typed customer identifier
///
/// # Examples
/// ```
/// use constat::types::CustomerId;
///
/// let customer = CustomerId::new(7);
/// assert_eq!(customer.get(), 7);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CustomerId(u64);

impl CustomerId {
    /// Create a new CustomerId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CustomerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly-typed employee identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeId(u64);

impl EmployeeId {
    /// Create a new EmployeeId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Strongly-typed work entry identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntryId(u64);

impl EntryId {
    /// Create a new EntryId
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the inner numeric value
    pub fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Aggregation window a customer's budget is evaluated over
///
/// Determines whether the contingent renews per calendar month or per
/// calendar quarter. Immutable for the purpose of a single report.
///
/// # Examples
/// ```
/// use constat::types::TimeSpan;
/// use std::str::FromStr;
///
/// let span = TimeSpan::from_str("quarterly").unwrap();
/// assert_eq!(span, TimeSpan::Quarterly);
/// assert_eq!(TimeSpan::Monthly.to_string(), "monthly");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeSpan {
    /// Budget renews every calendar month
    #[default]
    Monthly,
    /// Budget renews every calendar quarter
    Quarterly,
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Quarterly => write!(f, "quarterly"),
        }
    }
}

impl std::str::FromStr for TimeSpan {
    type Err = crate::error::ConstatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "quarterly" => Ok(Self::Quarterly),
            _ => Err(crate::error::ConstatError::UnsupportedTimeSpan(
                s.to_string(),
            )),
        }
    }
}

/// Status tier derived from a customer's usage percentage
///
/// Drives dashboard coloring and the fleet-wide status counts:
/// `ok` up to 75% consumption, `warning` above 75%, `danger` above 100%.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTier {
    /// Consumption at or below 75% of the budget
    Ok,
    /// Consumption above 75% but within the budget
    Warning,
    /// Consumption above the budget
    Danger,
}

impl fmt::Display for StatusTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ok => write!(f, "ok"),
            Self::Warning => write!(f, "warning"),
            Self::Danger => write!(f, "danger"),
        }
    }
}

/// A maintenance-contract customer with a recurring time budget
///
/// # Examples
/// ```
/// use constat::types::{Customer, CustomerId, TimeSpan};
///
/// let customer = Customer {
///     id: CustomerId::new(1),
///     customer_number: "K-1001".to_string(),
///     name: "Acme GmbH".to_string(),
///     contingent_hours: 10,
///     contingent_minutes: 30,
///     time_span: TimeSpan::Monthly,
/// };
/// assert_eq!(customer.total_budget_minutes(), 630);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    /// Customer identifier
    pub id: CustomerId,
    /// External customer number shown on reports
    pub customer_number: String,
    /// Display name
    pub name: String,
    /// Budget hours component (non-negative)
    pub contingent_hours: u64,
    /// Budget minutes component (non-negative)
    pub contingent_minutes: u64,
    /// Window the budget is evaluated over
    pub time_span: TimeSpan,
}

impl Customer {
    /// Total recurring budget in minutes. A zero budget is legal and is
    /// handled by the quota comparator without dividing by it.
    pub fn total_budget_minutes(&self) -> u64 {
        self.contingent_hours * 60 + self.contingent_minutes
    }

    /// Build from a raw ledger record
    ///
    /// A time span outside the known enum is fatal for the record; the
    /// settings layer is expected to have validated it upstream.
    pub fn from_raw(raw: RawCustomer) -> crate::error::Result<Self> {
        let time_span = raw.calculation_time_span.parse()?;
        Ok(Self {
            id: CustomerId::new(raw.id),
            customer_number: raw.customer_number,
            name: raw.name,
            contingent_hours: raw.contingent_hours,
            contingent_minutes: raw.contingent_minutes,
            time_span,
        })
    }
}

/// Raw customer record from the ledger export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCustomer {
    /// Customer identifier
    pub id: u64,
    /// External customer number
    #[serde(default)]
    pub customer_number: String,
    /// Display name
    pub name: String,
    /// Budget hours component
    #[serde(default)]
    pub contingent_hours: u64,
    /// Budget minutes component
    #[serde(default)]
    pub contingent_minutes: u64,
    /// Aggregation window as stored (`monthly` or `quarterly`)
    pub calculation_time_span: String,
}

/// How a work entry expresses its duration
///
/// The storage schema went through three incompatible generations: an
/// explicit start/end range, a hand-entered hours/minutes override, and a
/// single pre-resolved minute count. Modeling the shapes as one tagged
/// union keeps the resolution priority in exactly one place instead of
/// field-presence checks scattered through the codebase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DurationSource {
    /// Start/stop range; a missing end means the entry is still running
    Range {
        /// When the work started
        start: DateTime<Utc>,
        /// When the work stopped, if it has
        end: Option<DateTime<Utc>>,
    },
    /// Hand-entered duration, overriding whatever range the record carries
    Manual {
        /// Anchor instant used for period filtering
        anchored_at: DateTime<Utc>,
        /// Hand-entered hours
        hours: u64,
        /// Hand-entered minutes
        minutes: u64,
    },
    /// Duration already resolved upstream
    Precomputed {
        /// Anchor instant used for period filtering
        anchored_at: DateTime<Utc>,
        /// Resolved duration in whole minutes
        minutes: u64,
    },
}

/// One record of billable work performed for a customer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkEntry {
    /// Entry identifier
    pub id: EntryId,
    /// Customer the work was performed for
    pub customer_id: CustomerId,
    /// Employee who performed the work
    pub employee_id: EmployeeId,
    /// Short title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Duration in one of the three historical shapes
    pub duration: DurationSource,
}

impl WorkEntry {
    /// Anchor instant used to decide which billing period the entry
    /// belongs to: the start datetime for range and manual entries, the
    /// single datetime for precomputed ones.
    pub fn anchor(&self) -> DateTime<Utc> {
        match self.duration {
            DurationSource::Range { start, .. } => start,
            DurationSource::Manual { anchored_at, .. } => anchored_at,
            DurationSource::Precomputed { anchored_at, .. } => anchored_at,
        }
    }

    /// Whether the entry is still running (open range)
    pub fn is_running(&self) -> bool {
        matches!(
            self.duration,
            DurationSource::Range { end: None, .. }
        )
    }

    /// Build from a raw ledger record
    ///
    /// Encodes the duration-shape priority exactly once: a non-null
    /// manual hours field wins over everything, a pre-resolved minute
    /// count wins over the range fields, and the range form is the
    /// fallback. Records with no usable anchor or duration shape are
    /// dropped with a debug log, mirroring how damaged rows are skipped
    /// elsewhere rather than failing the whole load.
    pub fn from_raw(raw: RawWorkEntry) -> Option<Self> {
        let start = raw.start_datetime.as_deref().and_then(parse_datetime);
        let end = raw.end_datetime.as_deref().and_then(parse_datetime);
        let at = raw.datetime.as_deref().and_then(parse_datetime);

        let duration = if let Some(hours) = raw.manual_duration_hours {
            let Some(anchored_at) = start.or(at) else {
                tracing::debug!("Skipping manual entry {} without an anchor", raw.id);
                return None;
            };
            DurationSource::Manual {
                anchored_at,
                hours,
                minutes: raw.manual_duration_minutes.unwrap_or(0),
            }
        } else if let Some(minutes) = raw.duration_minutes {
            let Some(anchored_at) = at.or(start) else {
                tracing::debug!("Skipping precomputed entry {} without an anchor", raw.id);
                return None;
            };
            DurationSource::Precomputed {
                anchored_at,
                minutes,
            }
        } else if let Some(start) = start {
            DurationSource::Range { start, end }
        } else {
            tracing::debug!("Skipping entry {} with no usable duration shape", raw.id);
            return None;
        };

        Some(Self {
            id: EntryId::new(raw.id),
            customer_id: CustomerId::new(raw.customer_id),
            employee_id: EmployeeId::new(raw.employee_id),
            title: raw.title,
            description: raw.description.unwrap_or_default(),
            duration,
        })
    }
}

/// Raw work entry record from the ledger export
///
/// Carries all duration fields of all three schema generations as
/// optional columns, the way the operational database stores them.
/// Datetimes are kept as strings and parsed in `WorkEntry::from_raw`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawWorkEntry {
    /// Entry identifier
    pub id: u64,
    /// Customer the work was performed for
    pub customer_id: u64,
    /// Employee who performed the work
    pub employee_id: u64,
    /// Short title
    #[serde(default)]
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// Range form: start of the work
    #[serde(default)]
    pub start_datetime: Option<String>,
    /// Range form: end of the work, null while still running
    #[serde(default)]
    pub end_datetime: Option<String>,
    /// Manual form: hand-entered hours
    #[serde(default)]
    pub manual_duration_hours: Option<u64>,
    /// Manual form: hand-entered minutes
    #[serde(default)]
    pub manual_duration_minutes: Option<u64>,
    /// Precomputed form: single anchor instant
    #[serde(default)]
    pub datetime: Option<String>,
    /// Precomputed form: already-resolved duration in minutes
    #[serde(default)]
    pub duration_minutes: Option<u64>,
}

/// Out-of-budget emergency ticket
///
/// Not counted against the contingent; filtered by the same period
/// resolver purely for reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyTicket {
    /// Ticket identifier
    pub id: u64,
    /// Customer the ticket belongs to
    pub customer_id: CustomerId,
    /// Short title
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// When the ticket was raised
    pub datetime: DateTime<Utc>,
}

impl EmergencyTicket {
    /// Build from a raw ledger record; rows with an unparseable
    /// datetime are dropped with a debug log.
    pub fn from_raw(raw: RawEmergencyTicket) -> Option<Self> {
        let Some(datetime) = parse_datetime(&raw.datetime) else {
            tracing::debug!("Skipping ticket {} with unparseable datetime", raw.id);
            return None;
        };
        Some(Self {
            id: raw.id,
            customer_id: CustomerId::new(raw.customer_id),
            title: raw.title,
            description: raw.description.unwrap_or_default(),
            datetime,
        })
    }
}

/// Raw emergency ticket record from the ledger export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEmergencyTicket {
    /// Ticket identifier
    pub id: u64,
    /// Customer the ticket belongs to
    pub customer_id: u64,
    /// Short title
    #[serde(default)]
    pub title: String,
    /// Free-form description
    #[serde(default)]
    pub description: Option<String>,
    /// When the ticket was raised, as stored
    pub datetime: String,
}

/// Parse a ledger datetime, accepting RFC 3339 as well as the
/// `YYYY-MM-DD HH:MM:SS` form the operational database exports.
fn parse_datetime(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .ok()
        .map(|naive| naive.and_utc())
}
