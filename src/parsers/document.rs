use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::events::attributes::AttrError;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;
use tracing::debug;

/// Top-level element wrapping every request in a monitor log
pub const WRAPPER_ELEMENT: &str = "Requests";

/// Per-request element nested directly under [`WRAPPER_ELEMENT`]
pub const REQUEST_ELEMENT: &str = "Request";

// Appended when the monitor is still writing to the file and has not closed the wrapper yet
const WRAPPER_CLOSE: &str = "</Requests>";

const ID_ATTRIBUTE: &[u8] = b"id";

/// Why a monitor log could not be read as a well-formed document
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("XML syntax error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("invalid attribute: {0}")]
    Attribute(#[from] AttrError),

    #[error("mismatched end tag: expected </{expected}>, found </{found}>")]
    MismatchedEndTag { expected: String, found: String },

    #[error("end tag </{0}> has no matching start tag")]
    UnmatchedEndTag(String),

    #[error("element <{0}> is never closed")]
    UnclosedElement(String),

    #[error("no root element found")]
    NoRootElement,

    #[error("content after the root element")]
    TrailingContent,

    #[error("text outside the root element")]
    StrayText,
}

/// How a document had to be treated to parse
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// Parsed as written
    Intact,
    /// Parsed only after appending the missing wrapper close tag
    ClosedWrapper,
}

/// One `<Request>` element as found in the log, before normalisation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestNode {
    /// Raw `id` attribute, separators and all
    pub id: Option<String>,
    /// Child element names with their untrimmed text, in document order. Only
    /// the text before a field's first nested element is kept.
    pub children: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub root: String,
    /// Request elements found directly under a [`WRAPPER_ELEMENT`] root
    pub requests: Vec<RequestNode>,
    pub recovery: Recovery,
}

/// Parse a monitor log, closing the wrapper element if the log is still open
///
/// Makes exactly two attempts: the text as given, then the text with
/// `</Requests>` appended. When both fail the error from the first attempt is
/// returned, since that describes the file as it actually is.
pub fn recover_document(xml: &str) -> Result<Document, DocumentError> {
    let first_error = match parse_document(xml) {
        Ok(document) => return Ok(document),
        Err(e) => e,
    };

    debug!("Attempting wrapper element fix after: {}", first_error);
    let closed = format!("{}{}", xml, WRAPPER_CLOSE);
    match parse_document(&closed) {
        Ok(document) => Ok(Document { recovery: Recovery::ClosedWrapper, ..document }),
        Err(retry_error) => {
            debug!("Wrapper element fix failed: {}", retry_error);
            Err(first_error)
        }
    }
}

/// Parse a complete, well-formed monitor log
///
/// Only `<Request>` elements that are direct children of a `<Requests>` root are
/// collected; any other element is checked for well-formedness and then ignored.
pub fn parse_document(xml: &str) -> Result<Document, DocumentError> {
    let mut reader = Reader::from_str(xml);
    let mut collector = Collector::default();

    loop {
        match reader.read_event()? {
            Event::Start(start) => collector.open(&start)?,
            Event::Empty(start) => {
                collector.open(&start)?;
                collector.close(&element_name(start.name().as_ref()))?;
            }
            Event::End(end) => collector.close(&element_name(end.name().as_ref()))?,
            Event::Text(text) => collector.text(&text.unescape()?)?,
            Event::CData(data) => collector.text(&String::from_utf8_lossy(&data.into_inner()))?,
            Event::Eof => break,
            // Declarations, comments, processing instructions and doctypes carry no data
            _ => {}
        }
    }

    collector.finish()
}

#[derive(Default)]
struct Collector {
    stack: Vec<String>,
    root: Option<String>,
    request: Option<RequestNode>,
    field: Option<(String, String)>,
    // Set once the open field element has a child element; later text is ignored
    field_nested: bool,
    requests: Vec<RequestNode>,
}

impl Collector {
    fn open(&mut self, start: &BytesStart<'_>) -> Result<(), DocumentError> {
        let name = element_name(start.name().as_ref());

        match self.stack.len() {
            0 => {
                if self.root.is_some() {
                    return Err(DocumentError::TrailingContent);
                }
                self.root = Some(name.clone());
            }
            1 => {
                if self.in_wrapper() && name == REQUEST_ELEMENT {
                    self.request = Some(RequestNode { id: request_id(start)?, children: Vec::new() });
                }
            }
            2 => {
                if self.request.is_some() {
                    self.field = Some((name.clone(), String::new()));
                    self.field_nested = false;
                }
            }
            3 => self.field_nested = true,
            _ => {}
        }

        self.stack.push(name);
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), DocumentError> {
        let open = self.stack.pop().ok_or_else(|| DocumentError::UnmatchedEndTag(name.to_string()))?;
        if open != name {
            return Err(DocumentError::MismatchedEndTag { expected: open, found: name.to_string() });
        }

        match self.stack.len() {
            1 => {
                if let Some(request) = self.request.take() {
                    self.requests.push(request);
                }
            }
            2 => {
                if let (Some(request), Some(field)) = (self.request.as_mut(), self.field.take()) {
                    request.children.push(field);
                }
            }
            _ => {}
        }

        Ok(())
    }

    fn text(&mut self, text: &str) -> Result<(), DocumentError> {
        if self.stack.is_empty() {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(DocumentError::StrayText);
        }

        if self.stack.len() == 3
            && !self.field_nested
            && let Some((_, value)) = self.field.as_mut()
        {
            value.push_str(text);
        }
        Ok(())
    }

    fn finish(self) -> Result<Document, DocumentError> {
        if let Some(open) = self.stack.last() {
            return Err(DocumentError::UnclosedElement(open.clone()));
        }
        let root = self.root.ok_or(DocumentError::NoRootElement)?;

        Ok(Document { root, requests: self.requests, recovery: Recovery::Intact })
    }

    fn in_wrapper(&self) -> bool {
        self.root.as_deref() == Some(WRAPPER_ELEMENT)
    }
}

fn element_name(raw: &[u8]) -> String {
    match String::from_utf8_lossy(raw) {
        Cow::Borrowed(s) => s.to_string(),
        Cow::Owned(s) => s,
    }
}

fn request_id(start: &BytesStart<'_>) -> Result<Option<String>, DocumentError> {
    for attribute in start.attributes() {
        let attribute = attribute?;
        if attribute.key.as_ref() == ID_ATTRIBUTE {
            return Ok(Some(attribute.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}
