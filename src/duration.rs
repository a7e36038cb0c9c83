//! Duration resolution for the three work entry shapes
//!
//! One `match` over the `DurationSource` union resolves any entry to
//! whole minutes. `now` is an explicit parameter so open entries stay
//! testable; the engine never reads the system clock itself.

use crate::error::{ConstatError, Result};
use crate::types::{DurationSource, WorkEntry};
use chrono::{DateTime, Utc};

/// Resolve a work entry to its duration in whole minutes
///
/// Priority is fixed by the variant the entry was parsed into: a manual
/// override beats a precomputed count beats the start/end range. Open
/// range entries (no end yet) are measured against the supplied `now`,
/// which makes their contribution provisional: two calls with different
/// `now` values legitimately disagree.
///
/// Range durations are rounded to the nearest whole minute. An entry
/// whose end lies before its start is rejected with
/// [`ConstatError::InvalidEntry`]; negative minutes never leave this
/// function.
///
/// # Examples
///
/// ```
/// use constat::duration::resolve_duration;
/// use constat::types::{CustomerId, DurationSource, EmployeeId, EntryId, WorkEntry};
/// use chrono::{Duration, Utc};
///
/// let now = Utc::now();
/// let entry = WorkEntry {
///     id: EntryId::new(1),
///     customer_id: CustomerId::new(1),
///     employee_id: EmployeeId::new(1),
///     title: "Backup check".to_string(),
///     description: String::new(),
///     duration: DurationSource::Range {
///         start: now - Duration::minutes(45),
///         end: None,
///     },
/// };
/// assert_eq!(resolve_duration(&entry, now).unwrap(), 45);
/// ```
pub fn resolve_duration(entry: &WorkEntry, now: DateTime<Utc>) -> Result<u64> {
    match entry.duration {
        DurationSource::Manual { hours, minutes, .. } => Ok(hours * 60 + minutes),
        DurationSource::Precomputed { minutes, .. } => Ok(minutes),
        DurationSource::Range { start, end } => {
            let effective_end = end.unwrap_or(now);
            if effective_end < start {
                return Err(ConstatError::InvalidEntry {
                    id: entry.id,
                    start,
                    end: effective_end,
                });
            }
            let seconds = (effective_end - start).num_seconds();
            Ok(((seconds + 30) / 60) as u64)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CustomerId, EmployeeId, EntryId};
    use chrono::{Duration, TimeZone};

    fn entry(duration: DurationSource) -> WorkEntry {
        WorkEntry {
            id: EntryId::new(1),
            customer_id: CustomerId::new(1),
            employee_id: EmployeeId::new(1),
            title: "test".to_string(),
            description: String::new(),
            duration,
        }
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 2, h, m, 0).unwrap()
    }

    #[test]
    fn test_closed_range() {
        let e = entry(DurationSource::Range {
            start: at(9, 0),
            end: Some(at(10, 30)),
        });
        assert_eq!(resolve_duration(&e, at(12, 0)).unwrap(), 90);
    }

    #[test]
    fn test_range_rounds_to_whole_minutes() {
        let start = at(9, 0);
        let e = entry(DurationSource::Range {
            start,
            end: Some(start + Duration::seconds(90)),
        });
        assert_eq!(resolve_duration(&e, at(12, 0)).unwrap(), 2);

        let e = entry(DurationSource::Range {
            start,
            end: Some(start + Duration::seconds(89)),
        });
        assert_eq!(resolve_duration(&e, at(12, 0)).unwrap(), 1);
    }

    #[test]
    fn test_open_range_measured_against_now() {
        let e = entry(DurationSource::Range {
            start: at(9, 0),
            end: None,
        });

        assert_eq!(resolve_duration(&e, at(9, 45)).unwrap(), 45);
        // Same entry, later now: the contribution is provisional.
        assert_eq!(resolve_duration(&e, at(9, 55)).unwrap(), 55);
    }

    #[test]
    fn test_manual_override() {
        let e = entry(DurationSource::Manual {
            anchored_at: at(9, 0),
            hours: 2,
            minutes: 30,
        });
        assert_eq!(resolve_duration(&e, at(12, 0)).unwrap(), 150);
    }

    #[test]
    fn test_precomputed_passes_through() {
        let e = entry(DurationSource::Precomputed {
            anchored_at: at(9, 0),
            minutes: 42,
        });
        assert_eq!(resolve_duration(&e, at(12, 0)).unwrap(), 42);
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let e = entry(DurationSource::Range {
            start: at(10, 0),
            end: Some(at(9, 0)),
        });
        assert!(matches!(
            resolve_duration(&e, at(12, 0)),
            Err(ConstatError::InvalidEntry { .. })
        ));
    }

    #[test]
    fn test_open_range_started_after_now_is_rejected() {
        // Manual data entry can place the start in the future; treated
        // the same as an inverted range.
        let e = entry(DurationSource::Range {
            start: at(10, 0),
            end: None,
        });
        assert!(resolve_duration(&e, at(9, 0)).is_err());
    }

    #[test]
    fn test_zero_length_range() {
        let e = entry(DurationSource::Range {
            start: at(9, 0),
            end: Some(at(9, 0)),
        });
        assert_eq!(resolve_duration(&e, at(12, 0)).unwrap(), 0);
    }
}
