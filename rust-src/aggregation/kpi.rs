//! Headline metrics computed over the filtered rows.

use serde::Serialize;

use crate::error::{DashboardError, Result};
use crate::models::ComplaintRecord;


/// The four KPI figures for a selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Kpis {
    pub total: u64,
    /// Rows whose response contains "Closed".
    pub closed: u64,
    /// Rows whose response is exactly "In Progress".
    pub in_progress: u64,
    pub timely: u64,
}


impl Kpis {
    /// Share of complaints answered on time, in percent.
    pub fn timely_percentage(&self) -> Result<f64> {
        if self.total == 0 {
            return Err(DashboardError::NoComplaints);
        }
        Ok(self.timely as f64 / self.total as f64 * 100.0)
    }
}


/// Sum counts over the rows of the current selection.
pub fn compute_kpis(records: &[&ComplaintRecord]) -> Result<Kpis> {
    records.iter().try_fold(Kpis::default(), |mut kpis, record| {
        kpis.total = record.add_to(kpis.total)?;
        if record.is_closed() {
            kpis.closed = record.add_to(kpis.closed)?;
        }
        if record.is_in_progress() {
            kpis.in_progress = record.add_to(kpis.in_progress)?;
        }
        if record.is_timely() {
            kpis.timely = record.add_to(kpis.timely)?;
        }
        Ok(kpis)
    })
}
