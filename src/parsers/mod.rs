//! Parsers for GeoServer monitor request logs
//!
//! # Error Handling Strategy
//!
//! Parsing happens in two layers, each with its own failure policy:
//!
//! - **Document level** ([`document`]): the whole file must be well-formed XML. A log the
//!   monitor is still writing has no closing `</Requests>` tag, so a failed parse is retried
//!   exactly once with that tag appended. If the retry fails too, the file is rejected with a
//!   [`DocumentError`] and the caller skips it.
//!
//! - **Record level** ([`record`]): a `<Request>` without a usable `id` attribute is rejected
//!   with a [`RecordError`]. [`monitor_log`] logs and counts these and keeps going, so one bad
//!   request never costs the rest of the file.
//!
//! - **Error propagation**: the file-level entry point returns `anyhow::Result` with the path
//!   attached as context. The typed errors stay reachable through `downcast_ref`.

pub mod document;
pub mod monitor_log;
pub mod record;

pub use document::{Document, DocumentError, Recovery, RequestNode, recover_document};
pub use monitor_log::{ParsedLog, parse_monitor_log, parse_monitor_log_str};
pub use record::{RecordError, parse_record, parse_request_id};
