//! Where the complaints table comes from.

use std::path::PathBuf;
use std::time::Duration;

use tracing::info;

use crate::config::export_url;
use crate::error::Result;
use crate::models::Dataset;

use super::csv_parser::{load_csv_file, parse_csv};
use super::fetch::fetch_csv;


/// Origin of the complaints table.
#[derive(Debug, Clone, PartialEq)]
pub enum DataSource {
    /// Google Sheets CSV export.
    Remote {
        sheet_id: String,
        sheet_name: String,
        timeout: Duration,
    },
    /// A CSV export saved locally.
    File(PathBuf),
}


impl DataSource {
    /// Human-readable description for status lines.
    pub fn describe(&self) -> String {
        match self {
            Self::Remote { sheet_id, sheet_name, .. } => format!("sheet {sheet_name} ({sheet_id})"),
            Self::File(path) => path.display().to_string(),
        }
    }

    /// Load the full table once.
    pub fn load(&self) -> Result<Dataset> {
        let records = match self {
            Self::Remote { sheet_id, sheet_name, timeout } => {
                let body = fetch_csv(&export_url(sheet_id, sheet_name), *timeout)?;
                parse_csv(&body)?
            }
            Self::File(path) => load_csv_file(path)?,
        };

        info!(rows = records.len(), source = %self.describe(), "loaded complaints table");
        Ok(Dataset::new(records))
    }
}
