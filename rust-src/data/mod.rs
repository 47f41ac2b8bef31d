//! Data access layer for the complaints sheet.

mod csv_parser;
mod fetch;
mod source;

pub use source::DataSource;
