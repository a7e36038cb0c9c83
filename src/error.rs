//! Error types for constat
//!
//! This module defines the error types used throughout the constat library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use constat::error::{ConstatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to ConstatError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

use crate::types::EntryId;

/// Main error type for constat operations
///
/// This enum encompasses all possible errors that can occur while loading
/// ledger data and computing contingent usage reports.
#[derive(Error, Debug)]
pub enum ConstatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Work entry whose end datetime lies before its start datetime.
    /// Such entries are excluded from aggregation, never summed.
    #[error("work entry {id} ends before it starts ({end} < {start})")]
    InvalidEntry {
        /// The offending entry
        id: EntryId,
        /// Recorded start of the entry
        start: chrono::DateTime<chrono::Utc>,
        /// Recorded end of the entry
        end: chrono::DateTime<chrono::Utc>,
    },

    /// Calculation time span value outside the known enum.
    /// Callers validate the enum upstream; hitting this is a programmer
    /// error and fatal to the single report being built.
    #[error("unsupported calculation time span: {0}")]
    UnsupportedTimeSpan(String),

    /// Invalid date or reference month
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Parse error with file context
    #[error("Parse error in {file}: {error}")]
    Parse {
        /// The file that caused the error
        file: PathBuf,
        /// The error message
        error: String,
    },

    /// Unknown customer id requested
    #[error("Unknown customer: {0}")]
    UnknownCustomer(u64),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Convenience type alias for Results in constat
///
/// This type alias makes it easier to work with Results throughout
/// the codebase by providing a default error type.
///
/// # Example
///
/// ```
/// use constat::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ConstatError>;
