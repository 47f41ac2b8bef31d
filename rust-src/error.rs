//! Error types for loading and aggregating complaint data.

use thiserror::Error;


/// Everything that can go wrong between fetching the sheet and drawing it.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV at line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("required column `{0}` is missing from the dataset")]
    MissingColumn(String),

    #[error("invalid `Month Year` value {value:?} at line {line} (expected dd/mm/yyyy)")]
    InvalidDate { line: u64, value: String },

    #[error("complaint counts overflow at line {line}")]
    CountOverflow { line: u64 },

    #[error("no complaints in the current selection, timely percentage is undefined")]
    NoComplaints,

    #[error("state `{0}` does not appear in the dataset")]
    UnknownState(String),
}


pub type Result<T> = std::result::Result<T, DashboardError>;
