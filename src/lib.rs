//! Log Mangler - Merge and summarise GeoServer monitor request logs
//!
//! The GeoServer monitor extension writes one `<Request>` element per served request
//! into a `<Requests>` document. This library:
//!
//! - Parses those logs, including ones the server is still writing to (no closing tag)
//! - Merges any number of logs into a single index keyed by request id, later logs winning
//! - Exports the merged index as CSV, sorted by id
//! - Summarises it by outcome, service/version, user and resource
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use log_mangler::{RequestStats, build_index};
//!
//! let outcome = build_index(&[PathBuf::from("monitor_1.log"), PathBuf::from("monitor_2.log")])?;
//! let stats = RequestStats::from_index(&outcome.index);
//! println!("{} requests, {} failed", stats.total, stats.failed);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod export;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod stats;
pub mod utils;

// Re-export commonly used types
pub use export::write_csv;
pub use indexer::{RequestIndex, build_index};
pub use models::{Field, LogRecord};
pub use parsers::parse_monitor_log;
pub use stats::RequestStats;
