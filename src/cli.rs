//! CLI interface for constat
//!
//! This module defines the command-line interface using clap. Every
//! command operates on one reference period; month and year default to
//! the current ones when omitted.
//!
//! # Example
//!
//! ```bash
//! # Fleet overview for the current period
//! constat fleet
//!
//! # One customer's May 2024 report as JSON
//! constat report --customer 7 --month 5 --year 2024 --json
//!
//! # Emergency tickets raised inside the resolved period
//! constat tickets --month 5 --year 2024
//! ```

use crate::error::{ConstatError, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Track maintenance-contract contingents from work entry logs
#[derive(Parser, Debug, Clone)]
#[command(name = "constat")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Only log warnings and errors
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to the ledger export (defaults to $CONSTAT_DATA, then ./contingent.json)
    #[arg(long, short = 'i', global = true, env = "CONSTAT_DATA")]
    pub input: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Reference period shared by all commands
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct PeriodArgs {
    /// Reference month (1-12), defaults to the current month
    #[arg(long, short = 'm')]
    pub month: Option<u32>,

    /// Reference year, defaults to the current year
    #[arg(long, short = 'y')]
    pub year: Option<i32>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Contingent usage for every customer, most critical first
    Fleet {
        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Usage report for a single customer
    Report {
        /// Customer id to report on
        #[arg(long, short = 'c')]
        customer: u64,

        #[command(flatten)]
        period: PeriodArgs,
    },
    /// Emergency tickets inside the reference period
    Tickets {
        /// Restrict to a single customer id
        #[arg(long, short = 'c')]
        customer: Option<u64>,

        #[command(flatten)]
        period: PeriodArgs,
    },
}

/// Validate a reference month before it reaches the engine
///
/// The engine assumes 1-12; anything else is rejected here.
pub fn validate_month(month: u32) -> Result<u32> {
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(ConstatError::InvalidDate(format!(
            "reference month must be 1-12, got {month}"
        )))
    }
}
