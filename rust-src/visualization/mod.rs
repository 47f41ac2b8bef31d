//! Visualization layer: terminal dashboard and image export.

mod dashboard;
mod export;
mod format;
mod layout;

pub use dashboard::run_dashboard;
pub use export::{export_dashboard_png, export_dashboard_svg, open_file};
pub use format::format_number;
