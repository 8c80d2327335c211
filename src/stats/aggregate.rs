use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::indexer::RequestIndex;
use crate::models::{Field, LogRecord};

/// Failed/successful request counts for one grouping key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub failed: u64,
    pub success: u64,
}

/// Service → version → outcome counts
pub type ServiceBreakdown = BTreeMap<String, BTreeMap<String, OutcomeCounts>>;

/// Summary of every request in an index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestStats {
    pub total: u64,
    /// Requests with `Failed` = `true`
    pub failed: u64,
    /// Requests with `Failed` = `false`
    pub success: u64,
    pub services: ServiceBreakdown,
    /// Requests per `RemoteUser`; the empty string is its own bucket
    pub users: BTreeMap<String, u64>,
    /// Uses per resource name, each name in `Resources` counted separately
    pub resources: BTreeMap<String, u64>,
    /// Empty entries in `Resources`, including requests that touched nothing
    pub unnamed_resources: u64,
    pub first_request: Option<DateTime<Utc>>,
    pub last_request: Option<DateTime<Utc>>,
}

impl RequestStats {
    pub fn from_index(index: &RequestIndex) -> Self {
        let mut stats = Self::default();
        for (_, record) in index.all() {
            stats.add(record);
        }
        stats
    }

    /// Fold one request into the summary
    pub fn add(&mut self, record: &LogRecord) {
        self.total += 1;

        // The pair is created on first sight even when Failed holds neither literal
        let counts = self
            .services
            .entry(record.get(Field::Service).to_string())
            .or_default()
            .entry(record.get(Field::Version).to_string())
            .or_default();

        match record.failed() {
            Some(true) => {
                self.failed += 1;
                counts.failed += 1;
            }
            Some(false) => {
                self.success += 1;
                counts.success += 1;
            }
            None => {}
        }

        for name in record.get(Field::Resources).split(',').map(str::trim) {
            if name.is_empty() {
                self.unnamed_resources += 1;
            } else {
                *self.resources.entry(name.to_string()).or_default() += 1;
            }
        }

        *self.users.entry(record.get(Field::RemoteUser).to_string()).or_default() += 1;

        if let Some(start) = parse_start_time(record.get(Field::StartTime)) {
            self.first_request = Some(self.first_request.map_or(start, |first| first.min(start)));
            self.last_request = Some(self.last_request.map_or(start, |last| last.max(start)));
        }
    }

    /// Share of failed requests in percent, `None` when there are no requests
    pub fn failed_percentage(&self) -> Option<f64> {
        percentage(self.failed, self.total)
    }

    /// Share of successful requests in percent, `None` when there are no requests
    pub fn success_percentage(&self) -> Option<f64> {
        percentage(self.success, self.total)
    }
}

fn percentage(count: u64, total: u64) -> Option<f64> {
    if total == 0 {
        return None;
    }
    Some(count as f64 / total as f64 * 100.0)
}

fn parse_start_time(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.with_timezone(&Utc))
}
