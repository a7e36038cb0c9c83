//! constat - Track maintenance-contract contingents from work entry logs
//!
//! This library provides functionality to:
//! - Resolve the monthly or quarterly billing period a report covers
//! - Resolve work entry durations across three historical record shapes
//! - Aggregate consumed minutes per customer and period
//! - Compare consumption against the recurring budget and classify it
//!   into the `ok`/`warning`/`danger` status tiers
//!
//! # Examples
//!
//! ```no_run
//! use constat::{data_loader::DataLoader, report::fleet_summary};
//! use chrono::Utc;
//!
//! fn main() -> constat::Result<()> {
//!     let ledger = DataLoader::new(None).load()?;
//!
//!     // One consistent `now` for any still-running entries
//!     let now = Utc::now();
//!     let summary = fleet_summary(&ledger.customers, &ledger.work_entries, 5, 2024, now);
//!
//!     for report in &summary.reports {
//!         println!("{}: {}", report.customer_name, report.status_tier);
//!     }
//!     Ok(())
//! }
//! ```

pub mod aggregation;
pub mod cli;
pub mod data_loader;
pub mod duration;
pub mod error;
pub mod output;
pub mod period;
pub mod quota;
pub mod report;
pub mod types;

// Re-export commonly used types
pub use error::{ConstatError, Result};
pub use types::{Customer, CustomerId, EntryId, StatusTier, TimeSpan, WorkEntry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
