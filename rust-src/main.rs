//! Consumer complaints dashboard.
//!
//! Loads the complaints sheet export, filters it by state and renders KPIs
//! and charts in the terminal or as an image.

mod aggregation;
mod cli;
mod commands;
mod config;
mod data;
mod error;
mod logging;
mod models;
mod visualization;


fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
