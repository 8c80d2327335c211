//! Statistics over the merged request index
//!
//! [`aggregate`] folds every request into a [`RequestStats`] in a single pass;
//! [`report`] renders it either as the text report or as JSON.

pub mod aggregate;
pub mod report;

pub use aggregate::{OutcomeCounts, RequestStats, ServiceBreakdown};
pub use report::{StatsFormat, print_stats, write_json, write_report};
