//! Export command for dashboard images.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::aggregation::{DashboardView, StateFilter};
use crate::config::get_export_dir;
use crate::data::DataSource;
use crate::visualization::{export_dashboard_png, export_dashboard_svg, open_file};


/// Run the export command.
pub fn run(
    source: &DataSource,
    svg: bool,
    should_open: bool,
    state: Option<String>,
    output: Option<String>,
) -> Result<()> {
    // Determine format and output path
    let format_type = if svg { "svg" } else { "png" };
    let output_path = if let Some(path) = output {
        PathBuf::from(path)
    } else {
        let default_dir = get_export_dir();
        std::fs::create_dir_all(&default_dir).with_context(|| {
            format!("Failed to create directory: {}", default_dir.display())
        })?;
        default_dir.join(format!("complaints-dashboard.{}", format_type))
    };

    println!("Loading complaints from {}...", source.describe());
    let dataset = source.load().context("Failed to load complaints data")?;

    let selection = state.as_deref().map(StateFilter::parse).unwrap_or_default();
    let view = DashboardView::compute(&dataset, &selection)?;

    println!("Exporting to {}...", format_type.to_uppercase());

    if svg {
        export_dashboard_svg(&view, &output_path)?;
    } else {
        export_dashboard_png(&view, &output_path)?;
    }

    println!("\x1b[32m+ Exported to: {}\x1b[0m", output_path.display());

    // Open if requested
    if should_open {
        println!("Opening {}...", format_type.to_uppercase());
        open_file(&output_path)?;
    }

    Ok(())
}
