//! KPI command - print the four headline metrics for a selection.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::aggregation::{compute_kpis, Kpis, StateFilter};
use crate::config::DASHBOARD_TITLE;
use crate::data::DataSource;
use crate::visualization::format_number;


/// Machine-readable KPI output.
#[derive(Debug, Serialize)]
struct KpiReport<'a> {
    state: &'a str,
    total_complaints: u64,
    closed_complaints: u64,
    in_progress_complaints: u64,
    timely_complaints: u64,
    /// `null` when the selection holds no complaints.
    timely_percentage: Option<f64>,
}


/// Run the kpi command.
pub fn run(source: &DataSource, state: Option<String>, json: bool) -> Result<()> {
    let dataset = source.load().context("Failed to load complaints data")?;
    let selection = state.as_deref().map(StateFilter::parse).unwrap_or_default();
    selection.validate(&dataset)?;

    let kpis = compute_kpis(&selection.apply(&dataset))?;

    if json {
        let report = KpiReport {
            state: selection.label(),
            total_complaints: kpis.total,
            closed_complaints: kpis.closed,
            in_progress_complaints: kpis.in_progress,
            timely_complaints: kpis.timely,
            timely_percentage: kpis.timely_percentage().ok(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&selection, &kpis);
    }

    Ok(())
}


fn print_report(selection: &StateFilter, kpis: &Kpis) {
    println!("\n{}", "=".repeat(50));
    println!("{:^50}", DASHBOARD_TITLE);
    println!("{}\n", "=".repeat(50));

    println!("State filter: {}", selection);
    println!("{}", "-".repeat(50));
    println!("  Total Complaints:        {:>15}", format_number(kpis.total));
    println!("  Closed Complaints:       {:>15}", format_number(kpis.closed));

    match kpis.timely_percentage() {
        Ok(pct) => println!("  % Timely Responded:      {:>15}", format!("{pct:.2}")),
        Err(e) => println!("  % Timely Responded:      {:>15}  ({e})", "n/a"),
    }

    println!("  In Progress Complaints:  {:>15}", format_number(kpis.in_progress));
}
