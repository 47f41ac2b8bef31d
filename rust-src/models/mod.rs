//! Data models for the complaints sheet.

mod complaint_record;

pub use complaint_record::{ComplaintRecord, Dataset, REQUIRED_COLUMNS};
