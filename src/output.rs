//! Output formatting module for constat
//!
//! This module provides formatters for displaying contingent reports in
//! different formats:
//! - Table format for human-readable terminal output
//! - JSON format for machine-readable output and integration with other tools
//!
//! # Examples
//!
//! ```
//! use constat::output::get_formatter;
//! use constat::report::{FleetSummary, StatusCounts};
//!
//! let summary = FleetSummary { reports: vec![], counts: StatusCounts::default() };
//!
//! // Table formatter for human-readable output
//! let formatter = get_formatter(false, false);
//! println!("{}", formatter.format_fleet(&summary));
//!
//! // JSON formatter for machine-readable output
//! let json_formatter = get_formatter(true, false);
//! println!("{}", json_formatter.format_fleet(&summary));
//! ```

use crate::quota::format_minutes;
use crate::report::{ContingentReport, FleetSummary};
use crate::types::{EmergencyTicket, StatusTier};
use colored::Colorize;
use prettytable::{Table, format, row};
use serde_json::json;

/// Trait for output formatters
///
/// Implementations can provide different output formats (table, JSON,
/// CSV, etc.) for the engine's reports.
pub trait OutputFormatter {
    /// Format the fleet summary with per-customer reports and tier counts
    fn format_fleet(&self, summary: &FleetSummary) -> String;

    /// Format a single customer report
    fn format_report(&self, report: &ContingentReport) -> String;

    /// Format emergency tickets inside a period
    fn format_tickets(&self, tickets: &[&EmergencyTicket]) -> String;
}

/// Table formatter for human-readable output
pub struct TableFormatter {
    /// Whether to color status tiers (disabled for non-terminal output)
    pub color: bool,
}

impl TableFormatter {
    /// Create a new TableFormatter
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn format_tier(&self, tier: StatusTier) -> String {
        if !self.color {
            return tier.to_string();
        }
        match tier {
            StatusTier::Ok => tier.to_string().green().to_string(),
            StatusTier::Warning => tier.to_string().yellow().to_string(),
            StatusTier::Danger => tier.to_string().red().to_string(),
        }
    }

    fn format_percentage(report: &ContingentReport) -> String {
        match report.usage_percentage {
            Some(pct) => format!("{pct:.1}%"),
            None => "over budget".to_string(),
        }
    }

    fn report_row(&self, table: &mut Table, report: &ContingentReport) {
        table.add_row(row![
            report.customer_name,
            report.customer_number,
            r -> format_minutes(report.budget_minutes as i64),
            r -> format_minutes(report.used_minutes as i64),
            r -> format_minutes(report.remaining_minutes),
            r -> Self::format_percentage(report),
            c -> self.format_tier(report.status_tier)
        ]);
    }
}

impl OutputFormatter for TableFormatter {
    fn format_fleet(&self, summary: &FleetSummary) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![
            b -> "Customer",
            b -> "Number",
            b -> "Contingent",
            b -> "Used",
            b -> "Remaining",
            b -> "Usage",
            b -> "Status"
        ]);

        for report in &summary.reports {
            self.report_row(&mut table, report);
        }

        let counts = summary.counts;
        format!(
            "{}\nok: {}  warning: {}  danger: {}",
            table, counts.ok, counts.warning, counts.danger
        )
    }

    fn format_report(&self, report: &ContingentReport) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![
            b -> "Customer",
            b -> "Number",
            b -> "Contingent",
            b -> "Used",
            b -> "Remaining",
            b -> "Usage",
            b -> "Status"
        ]);
        self.report_row(&mut table, report);

        let mut out = format!(
            "{} ({})\n{}",
            report.customer_name,
            report.period.label(),
            table
        );
        if !report.skipped_entries.is_empty() {
            let ids: Vec<String> = report
                .skipped_entries
                .iter()
                .map(|id| id.to_string())
                .collect();
            out.push_str(&format!(
                "\nExcluded {} invalid entry record(s): {}",
                ids.len(),
                ids.join(", ")
            ));
        }
        out
    }

    fn format_tickets(&self, tickets: &[&EmergencyTicket]) -> String {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);
        table.set_titles(row![
            b -> "Date",
            b -> "Customer",
            b -> "Title",
            b -> "Description"
        ]);

        for ticket in tickets {
            table.add_row(row![
                ticket.datetime.format("%Y-%m-%d %H:%M"),
                ticket.customer_id,
                ticket.title,
                ticket.description
            ]);
        }

        format!("{}\n{} ticket(s)", table, tickets.len())
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_fleet(&self, summary: &FleetSummary) -> String {
        serde_json::to_string_pretty(summary).unwrap_or_else(|e| {
            json!({"error": e.to_string()}).to_string()
        })
    }

    fn format_report(&self, report: &ContingentReport) -> String {
        serde_json::to_string_pretty(report).unwrap_or_else(|e| {
            json!({"error": e.to_string()}).to_string()
        })
    }

    fn format_tickets(&self, tickets: &[&EmergencyTicket]) -> String {
        serde_json::to_string_pretty(&tickets).unwrap_or_else(|e| {
            json!({"error": e.to_string()}).to_string()
        })
    }
}

/// Get the appropriate formatter based on output format
pub fn get_formatter(json: bool, color: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonFormatter)
    } else {
        Box::new(TableFormatter::new(color))
    }
}
