//! Data loader module for the ledger export
//!
//! The engine itself never touches storage; this module is the
//! caller-side collaborator that reads a JSON ledger exported from the
//! operational database and converts its raw records into domain types.
//!
//! The ledger is a single JSON document:
//!
//! ```json
//! {
//!   "customers": [ ... ],
//!   "work_entries": [ ... ],
//!   "emergency_tickets": [ ... ]
//! }
//! ```
//!
//! The path is taken from the `--input` flag, the `CONSTAT_DATA`
//! environment variable, or `./contingent.json`, in that order.
//!
//! Damaged work entry and ticket rows are skipped with a warning so one
//! bad record cannot take down a whole report run; customer records are
//! converted strictly, because an unknown calculation time span would
//! make every report for that customer wrong.

use crate::error::Result;
use crate::types::{
    Customer, EmergencyTicket, RawCustomer, RawEmergencyTicket, RawWorkEntry, WorkEntry,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// All domain data a report run needs
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    /// Maintenance-contract customers
    pub customers: Vec<Customer>,
    /// Work entries across all customers
    pub work_entries: Vec<WorkEntry>,
    /// Out-of-budget emergency tickets
    pub emergency_tickets: Vec<EmergencyTicket>,
}

/// Raw ledger document as exported
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLedger {
    /// Raw customer records
    #[serde(default)]
    pub customers: Vec<RawCustomer>,
    /// Raw work entry records
    #[serde(default)]
    pub work_entries: Vec<RawWorkEntry>,
    /// Raw emergency ticket records
    #[serde(default)]
    pub emergency_tickets: Vec<RawEmergencyTicket>,
}

/// Loader for the JSON ledger export
pub struct DataLoader {
    path: PathBuf,
}

impl DataLoader {
    /// Create a loader for an explicit path, falling back to the
    /// `CONSTAT_DATA` environment variable and then `./contingent.json`
    pub fn new(path: Option<PathBuf>) -> Self {
        let path = path
            .or_else(|| std::env::var("CONSTAT_DATA").ok().map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from("contingent.json"));
        Self { path }
    }

    /// The resolved ledger path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and convert the ledger
    ///
    /// # Errors
    ///
    /// Fails on IO problems, malformed JSON, or a customer record with
    /// an unsupported calculation time span.
    pub fn load(&self) -> Result<Ledger> {
        let content = std::fs::read_to_string(&self.path)?;
        let raw: RawLedger = serde_json::from_str(&content)?;
        debug!(
            "Loaded ledger from {}: {} customers, {} work entries, {} tickets",
            self.path.display(),
            raw.customers.len(),
            raw.work_entries.len(),
            raw.emergency_tickets.len()
        );
        Self::convert(raw)
    }

    fn convert(raw: RawLedger) -> Result<Ledger> {
        let customers = raw
            .customers
            .into_iter()
            .map(Customer::from_raw)
            .collect::<Result<Vec<_>>>()?;

        let total_entries = raw.work_entries.len();
        let work_entries: Vec<WorkEntry> = raw
            .work_entries
            .into_iter()
            .filter_map(WorkEntry::from_raw)
            .collect();
        if work_entries.len() < total_entries {
            warn!(
                "Dropped {} unusable work entry record(s)",
                total_entries - work_entries.len()
            );
        }

        let emergency_tickets = raw
            .emergency_tickets
            .into_iter()
            .filter_map(EmergencyTicket::from_raw)
            .collect();

        Ok(Ledger {
            customers,
            work_entries,
            emergency_tickets,
        })
    }
}
