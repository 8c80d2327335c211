use std::fmt::Display;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::LogRecord;
use crate::parsers::document::{Recovery, WRAPPER_ELEMENT, recover_document};
use crate::parsers::record::parse_record;

/// Records read from one monitor log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLog {
    /// Records in document order; duplicates within the file are kept
    pub records: Vec<LogRecord>,
    /// Request elements dropped because their id was missing or unusable
    pub skipped: usize,
    pub recovery: Recovery,
}

/// Read and parse a monitor log file
///
/// # Errors
///
/// Returns an error if the file cannot be read, or if it is not a well-formed
/// document even after closing the wrapper element. Malformed request elements
/// are not errors: they are logged and counted in [`ParsedLog::skipped`].
pub fn parse_monitor_log(path: &Path) -> Result<ParsedLog> {
    let xml = fs::read_to_string(path)
        .with_context(|| format!("Failed to read monitor log: {}", path.display()))?;

    parse_source(&xml, path.display())
        .with_context(|| format!("Failed parsing {} as XML", path.display()))
}

/// Parse monitor log text already held in memory
pub fn parse_monitor_log_str(xml: &str) -> Result<ParsedLog> {
    parse_source(xml, "log")
}

/// `source` names the log in skip warnings
fn parse_source(xml: &str, source: impl Display) -> Result<ParsedLog> {
    let document = recover_document(xml)?;

    if document.root != WRAPPER_ELEMENT {
        debug!("Root element <{}> is not <{}>, no requests read", document.root, WRAPPER_ELEMENT);
    }

    let mut records = Vec::with_capacity(document.requests.len());
    let mut skipped = 0;

    for (position, node) in document.requests.iter().enumerate() {
        match parse_record(node) {
            Ok(record) => records.push(record),
            Err(e) => {
                warn!("Skipping request {} in {}: {}", position + 1, source, e);
                skipped += 1;
            }
        }
    }

    Ok(ParsedLog { records, skipped, recovery: document.recovery })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;
    use crate::models::Field;
    use crate::parsers::document::DocumentError;

    const LOG: &str = r#"<Requests>
<Request id="1.000"><Service>WMS</Service><Failed>false</Failed></Request>
<Request><Service>WFS</Service></Request>
<Request id="1.001"><Service>WCS</Service><Failed>true</Failed></Request>
</Requests>"#;

    #[test]
    fn test_parse_skips_requests_without_id() {
        let parsed = parse_monitor_log_str(LOG).unwrap();

        assert_eq!(parsed.skipped, 1);
        assert_eq!(parsed.recovery, Recovery::Intact);
        let ids: Vec<u64> = parsed.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1000, 1001]);
        assert_eq!(parsed.records[1].get(Field::Service), "WCS");
    }

    #[test]
    fn test_parse_open_log() {
        let open = LOG.trim_end_matches("</Requests>");
        let parsed = parse_monitor_log_str(open).unwrap();

        assert_eq!(parsed.recovery, Recovery::ClosedWrapper);
        assert_eq!(parsed.records, parse_monitor_log_str(LOG).unwrap().records);
    }

    #[test]
    fn test_parse_other_root_yields_nothing() {
        let parsed = parse_monitor_log_str("<Audit><Request id=\"1\"/></Audit>").unwrap();
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_parse_garbage_keeps_document_error() {
        let err = parse_monitor_log_str("this is not xml").unwrap_err();
        assert!(err.downcast_ref::<DocumentError>().is_some());
    }

    #[test]
    fn test_parse_monitor_log_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(LOG.as_bytes()).unwrap();

        let parsed = parse_monitor_log(file.path()).unwrap();
        assert_eq!(parsed.records.len(), 2);
    }

    #[test]
    fn test_parse_missing_file_names_path() {
        let err = parse_monitor_log(Path::new("/nonexistent/monitor.log")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/monitor.log"));
    }
}
