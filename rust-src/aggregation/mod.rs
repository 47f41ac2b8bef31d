//! Filtering and aggregation of complaint records.

mod charts;
mod filter;
mod kpi;
mod view;

pub use charts::{CategoryTotal, IssueGroup, MonthTotal};
pub use filter::{state_options, StateFilter};
pub use kpi::{compute_kpis, Kpis};
pub use view::DashboardView;
