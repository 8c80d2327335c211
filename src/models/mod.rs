//! Data models for GeoServer monitor request logs.
//!
//! - [`Field`] - The fixed, ordered set of named request attributes
//! - [`LogRecord`] - One served request: its id plus a value for every [`Field`]
//!
//! The field order doubles as the CSV column order, so it lives in one place and
//! is enforced by the type rather than by string keys.

pub mod record;

pub use record::{Field, LogRecord};
