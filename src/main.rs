//! constat - Track maintenance-contract contingents from work entry logs

use anyhow::Context;
use chrono::{Datelike, Utc};
use clap::Parser;
use constat::{
    aggregation::tickets_in_period,
    cli::{Cli, Command, PeriodArgs, validate_month},
    data_loader::DataLoader,
    output::get_formatter,
    period::resolve_period,
    report::{contingent_report, fleet_summary},
    types::{CustomerId, TimeSpan},
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fill missing period arguments from the current date
fn resolve_reference(period: PeriodArgs, now: chrono::DateTime<Utc>) -> constat::Result<(u32, i32)> {
    let month = validate_month(period.month.unwrap_or(now.month()))?;
    let year = period.year.unwrap_or(now.year());
    Ok((month, year))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging. The --quiet flag should override RUST_LOG.
    let filter = if cli.quiet {
        tracing_subscriber::EnvFilter::new("warn")
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("constat=info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // The engine never reads the clock; sample it exactly once here and
    // thread it through, so still-running entries are measured against a
    // single consistent instant.
    let now = Utc::now();

    let loader = DataLoader::new(cli.input.clone());
    let ledger = loader
        .load()
        .with_context(|| format!("failed to load ledger from {}", loader.path().display()))?;

    let color = !cli.json && is_terminal::is_terminal(std::io::stdout());
    let formatter = get_formatter(cli.json, color);

    // No command defaults to the fleet overview for the current period.
    let command = cli.command.unwrap_or(Command::Fleet {
        period: PeriodArgs::default(),
    });

    match command {
        Command::Report { customer, period } => {
            let (month, year) = resolve_reference(period, now)?;
            let customer_id = CustomerId::new(customer);
            let customer = ledger
                .customers
                .iter()
                .find(|c| c.id == customer_id)
                .ok_or(constat::ConstatError::UnknownCustomer(customer))?;

            info!(
                "Building {} report for {}",
                customer.time_span, customer.name
            );
            let report = contingent_report(customer, &ledger.work_entries, month, year, now);
            println!("{}", formatter.format_report(&report));
        }

        Command::Tickets { customer, period } => {
            let (month, year) = resolve_reference(period, now)?;
            // Tickets are informational and not tied to any customer's
            // budget cadence; the window is always the single month.
            let window = resolve_period(month, year, TimeSpan::Monthly);

            let mut tickets = tickets_in_period(&window, &ledger.emergency_tickets);
            if let Some(id) = customer {
                let customer_id = CustomerId::new(id);
                tickets.retain(|t| t.customer_id == customer_id);
            }

            info!("{} emergency ticket(s) in {}", tickets.len(), window.label());
            println!("{}", formatter.format_tickets(&tickets));
        }

        Command::Fleet { period } => {
            let (month, year) = resolve_reference(period, now)?;

            info!(
                "Building fleet summary for {} customer(s), reference {}-{:02}",
                ledger.customers.len(),
                year,
                month
            );
            let summary = fleet_summary(&ledger.customers, &ledger.work_entries, month, year, now);
            println!("{}", formatter.format_fleet(&summary));
        }
    }

    Ok(())
}
