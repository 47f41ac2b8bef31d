//! States command - list the options of the state selector.

use anyhow::{Context, Result};

use crate::aggregation::state_options;
use crate::data::DataSource;


/// Run the states command.
pub fn run(source: &DataSource) -> Result<()> {
    let dataset = source.load().context("Failed to load complaints data")?;

    for option in state_options(&dataset) {
        println!("{option}");
    }

    Ok(())
}
