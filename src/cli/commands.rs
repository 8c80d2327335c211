use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use crate::cli::config::{OutputMode, RunConfig};
use crate::export::export_csv;
use crate::indexer::build_index;
use crate::stats::{RequestStats, print_stats};
use crate::utils::init_logging;

#[derive(Parser, Debug)]
#[command(name = "log-mangler")]
#[command(version = "0.1.0")]
#[command(about = "Merge GeoServer monitor request logs into CSV or statistics", long_about = None)]
pub struct Cli {
    /// Output log entries as CSV to FILE (- for stdout)
    #[arg(long, value_name = "FILE", conflicts_with = "stats")]
    pub csv: Option<String>,

    /// Statistics on stdout
    #[arg(long)]
    pub stats: bool,

    /// Print statistics as JSON
    #[arg(long, requires = "stats")]
    pub json: bool,

    /// Debug output on stderr
    #[arg(long)]
    pub debug: bool,

    /// Monitor log files or directories; later sources overwrite earlier ones
    #[arg(value_name = "FILES", required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run() -> Result<()> {
    let config = RunConfig::from(Cli::parse());
    init_logging(config.debug);

    execute(config)
}

/// Ingest every source, then produce the selected output
pub fn execute(config: RunConfig) -> Result<()> {
    if config.mode == OutputMode::None {
        println!("Nothing to do: use --csv or --stats (see --help)");
        return Ok(());
    }

    let outcome = build_index(&config.sources)?;

    match config.mode {
        OutputMode::Csv(target) => export_csv(&target, &outcome.index)?,
        OutputMode::Stats(format) => {
            print_stats(&RequestStats::from_index(&outcome.index), format)?
        }
        OutputMode::None => {}
    }

    Ok(())
}
