//! CSV parser for the complaints sheet export.

use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::error::{DashboardError, Result};
use crate::models::{ComplaintRecord, REQUIRED_COLUMNS};


/// Parse CSV text into complaint records.
///
/// The header is checked for every required column before any row is read,
/// so a renamed column fails with [`DashboardError::MissingColumn`] rather
/// than a deserialization error on the first row.
pub fn parse_csv(text: &str) -> Result<Vec<ComplaintRecord>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::Headers)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(csv_error)?.clone();
    check_columns(&headers)?;

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        records.push(parse_row(&row, &headers)?);
    }

    let complaints = records.iter().try_fold(0, |total, r| r.add_to(total))?;

    debug!(rows = records.len(), complaints, "parsed complaints CSV");
    Ok(records)
}


/// Read and parse a CSV export saved on disk.
pub fn load_csv_file(path: &Path) -> Result<Vec<ComplaintRecord>> {
    let text = std::fs::read_to_string(path).map_err(|source| DashboardError::Io {
        path: path.display().to_string(),
        source,
    })?;

    parse_csv(&text)
}


/// Ensure every required column is present in the header row.
fn check_columns(headers: &StringRecord) -> Result<()> {
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(DashboardError::MissingColumn(column.to_string()));
        }
    }

    Ok(())
}


/// Deserialize a single row, remembering its source line.
fn parse_row(row: &StringRecord, headers: &StringRecord) -> Result<ComplaintRecord> {
    let line = row.position().map(|p| p.line()).unwrap_or(0);
    let mut record: ComplaintRecord = row
        .deserialize(Some(headers))
        .map_err(|source| DashboardError::Csv { line, source })?;
    record.line = line;
    Ok(record)
}


fn csv_error(source: csv::Error) -> DashboardError {
    let line = source.position().map(|p| p.line()).unwrap_or(0);
    DashboardError::Csv { line, source }
}


#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "state,company_response,timely,product,submitted_via,issue,sub_issue,Month Year,Count of complaint_id";

    #[test]
    fn test_parse_rows() {
        let text = format!(
            "{HEADER}\n\
             CA,Closed with explanation,Yes,Mortgage,Web,Trouble during payment process,Escrow,01/03/2023,5\n\
             NY,In Progress,No,Credit card,Phone,Billing disputes,,01/04/2023,3\n"
        );

        let records = parse_csv(&text).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].state, "CA");
        assert_eq!(records[0].month_year, "01/03/2023");
        assert_eq!(records[0].count, 5);
        assert_eq!(records[0].line, 2);
        assert_eq!(records[1].sub_issue, "");
        assert_eq!(records[1].line, 3);
    }

    #[test]
    fn test_quoted_fields_and_extra_columns() {
        let text = "\"state\",\"company_response\",\"timely\",\"product\",\"submitted_via\",\"issue\",\"sub_issue\",\"Month Year\",\"Count of complaint_id\",\"\"\n\
                    \"TX\",\"Closed, no relief\",\"Yes\",\"Debt collection\",\"Web\",\"Attempts to collect\",\"Debt is not yours\",\"01/01/2023\",\"12\",\"\"\n";

        let records = parse_csv(text).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].company_response, "Closed, no relief");
        assert_eq!(records[0].count, 12);
    }

    #[test]
    fn test_missing_column() {
        let text = "state,company_response,timely,product,submitted_via,issue,sub_issue,Month Year\nCA,Closed,Yes,P,Web,I,S,01/01/2023\n";
        match parse_csv(text) {
            Err(DashboardError::MissingColumn(col)) => assert_eq!(col, "Count of complaint_id"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_input_reports_missing_column() {
        assert!(matches!(parse_csv(""), Err(DashboardError::MissingColumn(_))));
    }

    #[test]
    fn test_negative_count_is_rejected() {
        let text = format!("{HEADER}\nCA,Closed,Yes,P,Web,I,S,01/01/2023,-4\n");
        match parse_csv(&text) {
            Err(DashboardError::Csv { line, .. }) => assert_eq!(line, 2),
            other => panic!("expected csv error, got {other:?}"),
        }
    }

    #[test]
    fn test_overflowing_total_is_rejected() {
        let text = format!(
            "{HEADER}\n\
             CA,Closed,Yes,P,Web,I,S,01/01/2023,18446744073709551615\n\
             NY,Closed,Yes,P,Web,I,S,01/01/2023,1\n"
        );
        match parse_csv(&text) {
            Err(DashboardError::CountOverflow { line }) => assert_eq!(line, 3),
            other => panic!("expected count overflow, got {other:?}"),
        }
    }

    #[test]
    fn test_huge_float_count_is_rejected() {
        let text = format!("{HEADER}\nCA,Closed,Yes,P,Web,I,S,01/01/2023,1e30\n");
        assert!(matches!(parse_csv(&text), Err(DashboardError::Csv { line: 2, .. })));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_csv_file(Path::new("/nonexistent/complaints.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::Io { .. }));
    }
}
