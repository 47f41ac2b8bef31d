//! Application settings and source constants.

use std::path::PathBuf;


/// Spreadsheet that hosts the complaints data.
pub const DEFAULT_SHEET_ID: &str = "1wV-DRmg31hWOK-o1UzhiKIlm2vwdH5y1";

/// Worksheet inside the spreadsheet.
pub const DEFAULT_SHEET_NAME: &str = "consumer_complaints";

/// HTTP timeout for the CSV export (seconds).
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Label of the selector entry that disables the state filter.
pub const ALL_STATES: &str = "All States";

/// Label of the selector entry for rows with no state.
pub const BLANK_STATE: &str = "(blank)";

/// Page title.
pub const DASHBOARD_TITLE: &str = "Consumer Financial Complaints Dashboard";

/// Static footer label.
pub const FOOTER_TEXT: &str = "Designed by: Muhammad Zohaib Khan";

/// Date format of the `Month Year` column.
pub const MONTH_YEAR_FORMAT: &str = "%d/%m/%Y";

/// Poll interval of the terminal event loop (milliseconds).
pub const EVENT_POLL_MS: u64 = 200;


/// Build the CSV export URL for a sheet.
pub fn export_url(sheet_id: &str, sheet_name: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:csv&sheet={}",
        sheet_id,
        urlencoding::encode(sheet_name),
    )
}


/// Get the default directory for exported images.
pub fn get_export_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("complaints-dashboard")
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_url_default_sheet() {
        let url = export_url(DEFAULT_SHEET_ID, DEFAULT_SHEET_NAME);
        assert_eq!(
            url,
            "https://docs.google.com/spreadsheets/d/1wV-DRmg31hWOK-o1UzhiKIlm2vwdH5y1\
             /gviz/tq?tqx=out:csv&sheet=consumer_complaints"
        );
    }

    #[test]
    fn test_export_url_encodes_sheet_name() {
        let url = export_url("abc", "my sheet&co");
        assert!(url.ends_with("sheet=my%20sheet%26co"));
    }

    #[test]
    fn test_get_export_dir() {
        let dir = get_export_dir();
        assert!(dir.to_string_lossy().contains("complaints-dashboard"));
    }
}
