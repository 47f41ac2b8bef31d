//! CLI definitions using clap.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::commands;
use crate::config::{DEFAULT_SHEET_ID, DEFAULT_SHEET_NAME, DEFAULT_TIMEOUT_SECS};
use crate::data::DataSource;
use crate::logging::init_logging;


/// Consumer complaints dashboard - KPIs and charts for the complaints sheet
#[derive(Parser)]
#[command(name = "ccd")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    source: SourceArgs,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}


/// Where to read the complaints table from.
#[derive(Args)]
struct SourceArgs {
    /// Spreadsheet id of the hosted sheet
    #[arg(long, global = true, env = "CCD_SHEET_ID", default_value = DEFAULT_SHEET_ID)]
    sheet_id: String,

    /// Worksheet name inside the spreadsheet
    #[arg(long, global = true, env = "CCD_SHEET_NAME", default_value = DEFAULT_SHEET_NAME)]
    sheet_name: String,

    /// Read a saved CSV export instead of downloading the sheet
    #[arg(long, global = true, env = "CCD_FILE")]
    file: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,
}


impl SourceArgs {
    fn data_source(&self) -> DataSource {
        match &self.file {
            Some(path) => DataSource::File(path.clone()),
            None => DataSource::Remote {
                sheet_id: self.sheet_id.clone(),
                sheet_name: self.sheet_name.clone(),
                timeout: Duration::from_secs(self.timeout),
            },
        }
    }
}


#[derive(Subcommand)]
enum Commands {
    /// Interactive dashboard with KPI cards and charts (default)
    Dashboard {
        /// Initial state filter (default: All States)
        #[arg(short, long)]
        state: Option<String>,
    },

    /// Print the four KPIs for a state filter
    Kpi {
        /// State filter (default: All States)
        #[arg(short, long)]
        state: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// List the state filter options
    States,

    /// Export the dashboard as PNG or SVG
    Export {
        /// Export as SVG instead of PNG
        #[arg(long)]
        svg: bool,

        /// Open file after export
        #[arg(long)]
        open: bool,

        /// State filter for the KPI cards (default: All States)
        #[arg(short, long)]
        state: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,
    },
}


/// Run the CLI
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let source = cli.source.data_source();

    match cli.command {
        None => commands::dashboard::run(&source, None),
        Some(Commands::Dashboard { state }) => commands::dashboard::run(&source, state),
        Some(Commands::Kpi { state, json }) => commands::kpi::run(&source, state, json),
        Some(Commands::States) => commands::states::run(&source),
        Some(Commands::Export { svg, open, state, output }) => {
            commands::export::run(&source, svg, open, state, output)
        }
    }
}
