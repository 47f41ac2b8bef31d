//! CLI command implementations.

pub mod dashboard;
pub mod export;
pub mod kpi;
pub mod states;
