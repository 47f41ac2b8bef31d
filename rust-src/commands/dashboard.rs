//! Interactive dashboard command.

use anyhow::{Context, Result};

use crate::aggregation::StateFilter;
use crate::data::DataSource;
use crate::visualization::run_dashboard;


/// Run the dashboard command.
pub fn run(source: &DataSource, state: Option<String>) -> Result<()> {
    println!("Loading complaints from {}...", source.describe());

    let dataset = source.load().context("Failed to load complaints data")?;
    if dataset.is_empty() {
        println!("The complaints sheet has no rows.");
        return Ok(());
    }

    let initial = state.as_deref().map(StateFilter::parse).unwrap_or_default();
    run_dashboard(&dataset, initial, &source.describe())
}
