//! Index builder for GeoServer monitor logs.
//!
//! # Error Handling Strategy
//!
//! This module follows a **graceful degradation** approach suitable for CLI tools:
//!
//! - **Source-level errors**: A source that cannot be read, or is not well-formed XML even
//!   after closing its wrapper element, is logged as a warning and skipped. The run goes on
//!   with the next source.
//! - **Record-level errors**: Requests without a usable id are skipped by the parser and
//!   counted in the summary.
//! - **Run-level failure**: Only when no source at all could be ingested does building fail,
//!   since any output would then describe nothing.
//!
//! Parsing runs on the rayon pool, one task per source. Results are gathered back in
//! command-line order before insertion so that overwrite order never depends on scheduling.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use rayon::prelude::*;
use tracing::{debug, debug_span, warn};

use crate::indexer::index::RequestIndex;
use crate::indexer::source_discovery::discover_sources;
use crate::parsers::{ParsedLog, Recovery, parse_monitor_log};

/// Counters describing one ingestion run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    pub sources_ingested: usize,
    pub sources_skipped: usize,
    /// Sources that only parsed after closing the wrapper element
    pub sources_recovered: usize,
    pub records_parsed: usize,
    pub records_skipped: usize,
    /// Inserts that replaced a record with the same id
    pub records_replaced: usize,
}

#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub index: RequestIndex,
    pub summary: IngestSummary,
}

/// Build the merged request index from monitor log files and directories
///
/// Inputs are expanded with [`discover_sources`], parsed, and inserted into a
/// single [`RequestIndex`] in input order. When two sources contain the same
/// request id, the later source wins.
///
/// # Errors
///
/// Returns an error if not a single source could be ingested. Individual
/// unreadable or malformed sources are logged and skipped.
///
/// # Examples
///
/// ```no_run
/// use std::path::PathBuf;
/// use log_mangler::build_index;
///
/// let outcome = build_index(&[PathBuf::from("/var/geoserver/monitoring")])?;
/// println!("Indexed {} requests", outcome.index.len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn build_index(inputs: &[PathBuf]) -> Result<IngestOutcome> {
    let sources = discover_sources(inputs);

    let parsed: Vec<(&PathBuf, Result<ParsedLog>)> =
        sources.par_iter().map(|path| (path, load_source(path))).collect();

    let mut index = RequestIndex::new();
    let mut summary = IngestSummary::default();

    for (path, result) in parsed {
        match result {
            Ok(log) => ingest_log(&mut index, &mut summary, path, log),
            Err(e) => {
                summary.sources_skipped += 1;
                warn!("{:#}, skipping.", e);
            }
        }
    }

    debug!(
        "Indexed {} requests from {} sources ({} skipped, {} recovered, {} records skipped, {} replaced)",
        index.len(),
        summary.sources_ingested,
        summary.sources_skipped,
        summary.sources_recovered,
        summary.records_skipped,
        summary.records_replaced
    );

    if summary.sources_ingested == 0 {
        bail!(
            "No input sources could be ingested ({} of {} skipped)",
            summary.sources_skipped,
            sources.len()
        );
    }

    Ok(IngestOutcome { index, summary })
}

fn load_source(path: &Path) -> Result<ParsedLog> {
    let _span = debug_span!("source", path = %path.display()).entered();
    debug!("Processing {}", path.display());
    parse_monitor_log(path)
}

fn ingest_log(index: &mut RequestIndex, summary: &mut IngestSummary, path: &Path, log: ParsedLog) {
    if log.recovery == Recovery::ClosedWrapper {
        debug!("Recovered {} by closing the wrapper element", path.display());
        summary.sources_recovered += 1;
    }

    summary.sources_ingested += 1;
    summary.records_parsed += log.records.len();
    summary.records_skipped += log.skipped;

    for record in log.records {
        if index.insert(record).is_some() {
            summary.records_replaced += 1;
        }
    }
}
