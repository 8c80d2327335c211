use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::stats::aggregate::RequestStats;

/// How `--stats` renders the aggregate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatsFormat {
    #[default]
    Text,
    Json,
}

/// Placeholder printed for empty grouping keys
const NONE_LABEL: &str = "[None]";

/// Write the human-readable statistics report
///
/// Sections, in order: totals, service/version breakdown, per-user counts and
/// per-resource counts. Resource lines are `workspace<TAB>layer<TAB>count`.
/// Percentages are left out when there are no requests at all.
pub fn write_report<W: Write>(mut out: W, stats: &RequestStats) -> io::Result<()> {
    let width = count_width(stats.total);

    writeln!(out, "Total req: {:>width$}", stats.total)?;
    write!(out, "Failed:    {:>width$}", stats.failed)?;
    if let Some(pct) = stats.failed_percentage() {
        write!(out, " ({:.1}%)", pct)?;
    }
    writeln!(out)?;
    write!(out, "Success:   {:>width$}", stats.success)?;
    if let Some(pct) = stats.success_percentage() {
        write!(out, " ({:.1}%)", pct)?;
    }
    writeln!(out)?;

    if let (Some(first), Some(last)) = (stats.first_request, stats.last_request) {
        writeln!(out, "First request: {}", first.format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(out, "Last request:  {}", last.format("%Y-%m-%d %H:%M:%S"))?;
    }

    writeln!(out, "Services ----- ")?;
    for (service, versions) in &stats.services {
        writeln!(out, "{}", label(service))?;
        for (version, counts) in versions {
            writeln!(
                out,
                "\t{}\tfailed: {}\tsuccess: {}",
                label(version),
                counts.failed,
                counts.success
            )?;
        }
    }

    writeln!(out, "Users ----- ")?;
    for (user, count) in &stats.users {
        writeln!(out, "{}\t{}", label(user), count)?;
    }

    writeln!(out, "Resources ----- ")?;
    for (name, count) in &stats.resources {
        let (workspace, layer) = split_resource(name);
        writeln!(out, "{}\t{}\t{}", workspace, layer, count)?;
    }
    if stats.unnamed_resources > 0 {
        writeln!(out, "{}\t{}\t{}", NONE_LABEL, NONE_LABEL, stats.unnamed_resources)?;
    }

    Ok(())
}

/// Write the statistics as a pretty-printed JSON document
pub fn write_json<W: Write>(mut out: W, stats: &RequestStats) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, stats).context("Failed to serialize statistics")?;
    writeln!(out).context("Failed to write statistics")?;
    Ok(())
}

/// Print the statistics to standard output
pub fn print_stats(stats: &RequestStats, format: StatsFormat) -> Result<()> {
    let stdout = io::stdout().lock();
    match format {
        StatsFormat::Text => {
            write_report(stdout, stats).context("Failed to write statistics report")
        }
        StatsFormat::Json => write_json(stdout, stats),
    }
}

/// Width of the count column: the digits of `total` plus one space
fn count_width(total: u64) -> usize {
    total.max(1).ilog10() as usize + 2
}

fn label(key: &str) -> &str {
    if key.is_empty() { NONE_LABEL } else { key }
}

/// Split `workspace:layer`; names without a workspace get the [`NONE_LABEL`] workspace
fn split_resource(name: &str) -> (&str, &str) {
    name.split_once(':').unwrap_or((NONE_LABEL, name))
}
