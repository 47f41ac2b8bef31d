//! Configuration and settings for the complaints dashboard.

mod settings;

pub use settings::{
    export_url,
    get_export_dir,
    ALL_STATES,
    BLANK_STATE,
    DASHBOARD_TITLE,
    DEFAULT_SHEET_ID,
    DEFAULT_SHEET_NAME,
    DEFAULT_TIMEOUT_SECS,
    EVENT_POLL_MS,
    FOOTER_TEXT,
    MONTH_YEAR_FORMAT,
};
