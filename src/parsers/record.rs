use thiserror::Error;

use crate::models::{Field, LogRecord};
use crate::parsers::document::RequestNode;

/// Why a single `<Request>` element could not become a [`LogRecord`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("request has no id attribute")]
    MissingId,

    #[error("request id {0:?} contains no digits")]
    InvalidId(String),

    #[error("request id {0:?} does not fit in 64 bits")]
    IdOverflow(String),
}

/// Parse a request id, ignoring grouping separators
///
/// The monitor formats ids with the server locale, so `1,234` and `1.234` both
/// mean 1234. Every non-digit character is dropped before parsing.
pub fn parse_request_id(raw: &str) -> Result<u64, RecordError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(RecordError::InvalidId(raw.to_string()));
    }
    digits.parse::<u64>().map_err(|_| RecordError::IdOverflow(raw.to_string()))
}

/// Normalise one request element into a [`LogRecord`]
///
/// Known child elements are trimmed and stored; unknown ones are dropped. If an
/// element repeats, the last occurrence wins. Values are not validated.
pub fn parse_record(node: &RequestNode) -> Result<LogRecord, RecordError> {
    let raw_id = node.id.as_deref().ok_or(RecordError::MissingId)?;
    let mut record = LogRecord::new(parse_request_id(raw_id)?);

    for (name, text) in &node.children {
        if let Some(field) = Field::from_name(name) {
            record.set(field, text.trim());
        }
    }

    Ok(record)
}
