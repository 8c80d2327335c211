use std::path::PathBuf;

use crate::cli::commands::Cli;
use crate::export::CsvTarget;
use crate::stats::StatsFormat;

/// What to produce once every source has been ingested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    Csv(CsvTarget),
    Stats(StatsFormat),
    /// Neither `--csv` nor `--stats` was given
    None,
}

/// Validated settings for one run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Files and directories in command-line order
    pub sources: Vec<PathBuf>,
    pub mode: OutputMode,
    /// Raises the default log level to DEBUG
    pub debug: bool,
}

impl From<Cli> for RunConfig {
    fn from(cli: Cli) -> Self {
        let mode = match (cli.csv, cli.stats) {
            (Some(dest), _) => OutputMode::Csv(CsvTarget::from_arg(&dest)),
            (None, true) if cli.json => OutputMode::Stats(StatsFormat::Json),
            (None, true) => OutputMode::Stats(StatsFormat::Text),
            (None, false) => OutputMode::None,
        };

        Self { sources: cli.files, mode, debug: cli.debug }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn config(args: &[&str]) -> RunConfig {
        let cli = Cli::try_parse_from(std::iter::once("log-mangler").chain(args.iter().copied()))
            .unwrap();
        RunConfig::from(cli)
    }

    #[test]
    fn test_csv_to_stdout() {
        let config = config(&["--csv", "-", "a.log"]);
        assert_eq!(config.mode, OutputMode::Csv(CsvTarget::Stdout));
        assert_eq!(config.sources, vec![PathBuf::from("a.log")]);
    }

    #[test]
    fn test_csv_to_file() {
        let config = config(&["a.log", "--csv", "out.csv", "b.log"]);
        assert_eq!(config.mode, OutputMode::Csv(CsvTarget::File("out.csv".into())));
        assert_eq!(config.sources, vec![PathBuf::from("a.log"), PathBuf::from("b.log")]);
    }

    #[test]
    fn test_stats_modes() {
        assert_eq!(config(&["--stats", "a.log"]).mode, OutputMode::Stats(StatsFormat::Text));
        assert_eq!(
            config(&["--stats", "--json", "a.log"]).mode,
            OutputMode::Stats(StatsFormat::Json)
        );
    }

    #[test]
    fn test_no_mode() {
        let config = config(&["--debug", "a.log"]);
        assert_eq!(config.mode, OutputMode::None);
        assert!(config.debug);
    }

    #[test]
    fn test_debug_defaults_off() {
        assert!(!config(&["--stats", "a.log"]).debug);
    }

    #[test]
    fn test_csv_and_stats_conflict() {
        let result = Cli::try_parse_from(["log-mangler", "--csv", "-", "--stats", "a.log"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_json_requires_stats() {
        let result = Cli::try_parse_from(["log-mangler", "--json", "a.log"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_sources_required() {
        let result = Cli::try_parse_from(["log-mangler", "--stats"]);
        assert_eq!(result.unwrap_err().kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }
}
