//! Ingestion of monitor logs into a single request index
//!
//! - [`source_discovery`] turns command-line paths into an ordered list of log files.
//! - [`builder`] parses every source and merges the records, later sources overwriting
//!   earlier ones, and reports what was skipped along the way.
//! - [`index`] is the id-keyed store both output stages read from.

pub mod builder;
pub mod index;
pub mod source_discovery;

pub use builder::{IngestOutcome, IngestSummary, build_index};
pub use index::RequestIndex;
pub use source_discovery::discover_sources;
