use std::fs::File;
use std::io::{self, Write};
use std::iter;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::indexer::RequestIndex;
use crate::models::Field;

/// Header of the id column, which precedes every [`Field`] column
pub const ID_COLUMN: &str = "ID";

/// Where the CSV export goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CsvTarget {
    Stdout,
    File(PathBuf),
}

impl CsvTarget {
    /// `-` means standard output, anything else is a file path
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" { CsvTarget::Stdout } else { CsvTarget::File(PathBuf::from(arg)) }
    }
}

/// Column headers in output order
pub fn header() -> impl Iterator<Item = &'static str> {
    iter::once(ID_COLUMN).chain(Field::ALL.into_iter().map(Field::name))
}

/// Write the index as CSV, one row per request, ascending by id
///
/// Values are written exactly as stored; quoting follows the `csv` crate's
/// defaults (double quotes, only where needed).
pub fn write_csv<W: Write>(writer: W, index: &RequestIndex) -> Result<()> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(header()).context("Failed to write CSV header")?;

    for record in index.sorted() {
        let id = record.id.to_string();
        let row = iter::once(id.as_str()).chain(record.values().map(|(_, value)| value));
        out.write_record(row).with_context(|| format!("Failed to write CSV row for request {}", id))?;
    }

    out.flush().context("Failed to flush CSV output")?;
    Ok(())
}

/// Write the CSV export to `target`, creating or truncating the file
pub fn export_csv(target: &CsvTarget, index: &RequestIndex) -> Result<()> {
    match target {
        CsvTarget::Stdout => write_csv(io::stdout().lock(), index),
        CsvTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;
            write_csv(file, index)
        }
    }
}
