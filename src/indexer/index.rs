use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::models::LogRecord;

/// All requests seen in one run, keyed by request id
///
/// Inserting an id that is already present replaces the stored record in full.
/// Sources are inserted in command-line order, so the last source to mention an
/// id decides its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestIndex {
    records: HashMap<u64, LogRecord>,
}

impl RequestIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced
    pub fn insert(&mut self, record: LogRecord) -> Option<LogRecord> {
        match self.records.entry(record.id) {
            Entry::Occupied(mut slot) => Some(slot.insert(record)),
            Entry::Vacant(slot) => {
                slot.insert(record);
                None
            }
        }
    }

    pub fn get(&self, id: u64) -> Option<&LogRecord> {
        self.records.get(&id)
    }

    /// Every record, in no particular order
    pub fn all(&self) -> impl Iterator<Item = (u64, &LogRecord)> {
        self.records.iter().map(|(id, record)| (*id, record))
    }

    /// Every record, ascending by id
    pub fn sorted(&self) -> Vec<&LogRecord> {
        let mut records: Vec<&LogRecord> = self.records.values().collect();
        records.sort_unstable_by_key(|record| record.id);
        records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Extend<LogRecord> for RequestIndex {
    fn extend<T: IntoIterator<Item = LogRecord>>(&mut self, iter: T) {
        for record in iter {
            self.insert(record);
        }
    }
}

impl FromIterator<LogRecord> for RequestIndex {
    fn from_iter<T: IntoIterator<Item = LogRecord>>(iter: T) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
