//! Complaint record model for the pre-aggregated complaints sheet.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DashboardError;


/// Response label marking a complaint the company answered on time.
pub const TIMELY_YES: &str = "Yes";

/// Substring that marks any closed status ("Closed", "Closed with explanation", ...).
pub const CLOSED_MARKER: &str = "Closed";

/// Exact response label for open complaints.
pub const IN_PROGRESS: &str = "In Progress";

/// Column headers the sheet must provide.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "state",
    "company_response",
    "timely",
    "product",
    "submitted_via",
    "issue",
    "sub_issue",
    "Month Year",
    "Count of complaint_id",
];


/// One row of the sheet. The source is grouped already, so a row stands
/// for `count` complaints sharing the same attributes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComplaintRecord {
    pub state: String,
    pub company_response: String,
    pub timely: String,
    pub product: String,
    pub submitted_via: String,
    pub issue: String,
    pub sub_issue: String,
    #[serde(rename = "Month Year")]
    pub month_year: String,
    #[serde(rename = "Count of complaint_id", deserialize_with = "deserialize_count")]
    pub count: u64,
    /// Line in the source CSV, used for error reporting.
    #[serde(skip)]
    pub line: u64,
}


impl ComplaintRecord {
    /// Whether the response status contains "Closed" anywhere.
    pub fn is_closed(&self) -> bool {
        self.company_response.contains(CLOSED_MARKER)
    }

    /// Whether the response status is exactly "In Progress".
    ///
    /// Deliberately an equality check, unlike [`is_closed`](Self::is_closed).
    pub fn is_in_progress(&self) -> bool {
        self.company_response == IN_PROGRESS
    }

    /// Whether the company responded on time.
    pub fn is_timely(&self) -> bool {
        self.timely == TIMELY_YES
    }

    /// Add this row's count to `total`, failing instead of wrapping.
    pub fn add_to(&self, total: u64) -> crate::error::Result<u64> {
        total
            .checked_add(self.count)
            .ok_or(DashboardError::CountOverflow { line: self.line })
    }
}


/// Immutable snapshot of every record loaded for the session.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    records: Vec<ComplaintRecord>,
}


impl Dataset {
    pub fn new(records: Vec<ComplaintRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[ComplaintRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Sum of counts across the whole table.
    ///
    /// Every selection is a subset of the table, so once this succeeds no
    /// per-state or per-category sum can overflow either.
    pub fn total_count(&self) -> crate::error::Result<u64> {
        self.records.iter().try_fold(0, |total, r| r.add_to(total))
    }
}


/// Accept integer counts, integral floats ("5.0") and empty cells (as 0).
fn deserialize_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_count(&raw).map_err(serde::de::Error::custom)
}


fn parse_count(raw: &str) -> Result<u64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    if let Ok(n) = trimmed.parse::<u64>() {
        return Ok(n);
    }

    match trimmed.parse::<f64>() {
        Ok(f) if f >= 0.0 && f < u64::MAX as f64 && f.fract() == 0.0 => Ok(f as u64),
        _ => Err(format!("invalid complaint count {trimmed:?}")),
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn record(response: &str, timely: &str) -> ComplaintRecord {
        ComplaintRecord {
            company_response: response.to_string(),
            timely: timely.to_string(),
            count: 1,
            ..Default::default()
        }
    }

    #[test]
    fn test_closed_is_substring_match() {
        assert!(record("Closed", "Yes").is_closed());
        assert!(record("Closed with explanation", "Yes").is_closed());
        assert!(record("Closed with monetary relief", "Yes").is_closed());
        assert!(!record("closed", "Yes").is_closed());
        assert!(!record("In Progress", "Yes").is_closed());
    }

    #[test]
    fn test_in_progress_is_exact_match() {
        assert!(record("In Progress", "No").is_in_progress());
        assert!(!record("In Progress (escalated)", "No").is_in_progress());
        assert!(!record("in progress", "No").is_in_progress());
    }

    #[test]
    fn test_timely() {
        assert!(record("Closed", "Yes").is_timely());
        assert!(!record("Closed", "No").is_timely());
        assert!(!record("Closed", "yes").is_timely());
    }

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count("42"), Ok(42));
        assert_eq!(parse_count(" 7 "), Ok(7));
        assert_eq!(parse_count("5.0"), Ok(5));
        assert_eq!(parse_count(""), Ok(0));
        assert!(parse_count("-3").is_err());
        assert!(parse_count("2.5").is_err());
        assert!(parse_count("many").is_err());
    }

    #[test]
    fn test_parse_count_rejects_out_of_range_floats() {
        assert_eq!(parse_count("18446744073709551615"), Ok(u64::MAX));
        assert!(parse_count("1e30").is_err());
        assert!(parse_count("18446744073709551616.0").is_err());
        assert!(parse_count("inf").is_err());
        assert!(parse_count("NaN").is_err());
    }

    #[test]
    fn test_dataset_total() {
        let dataset = Dataset::new(vec![record("Closed", "Yes"), record("Closed", "No")]);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.total_count().unwrap(), 2);
        assert!(!dataset.is_empty());
    }

    #[test]
    fn test_total_count_overflow() {
        let mut big = record("Closed", "Yes");
        big.count = u64::MAX;
        let mut one = record("Closed", "Yes");
        one.line = 7;

        let dataset = Dataset::new(vec![big, one]);
        assert!(matches!(
            dataset.total_count(),
            Err(DashboardError::CountOverflow { line: 7 })
        ));
    }
}
