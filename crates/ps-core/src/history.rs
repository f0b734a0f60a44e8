//! Completed matches, most recent first.

use serde::{Deserialize, Deserializer, Serialize};

use crate::record::MatchRecord;

/// Ordered list of completed matches, newest at index 0.
///
/// Only completed records are ever held. Grows only by
/// [`MatchHistory::prepend`]; entries leave only through an explicit
/// [`MatchHistory::remove`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct MatchHistory {
    records: Vec<MatchRecord>,
}

impl<'de> Deserialize<'de> for MatchHistory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<MatchRecord>::deserialize(deserializer).map(Self::from_records)
    }
}

impl MatchHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from records already ordered newest first.
    ///
    /// Records that were never completed are dropped.
    pub fn from_records(records: Vec<MatchRecord>) -> Self {
        let total = records.len();
        let records: Vec<_> = records.into_iter().filter(MatchRecord::is_complete).collect();
        if records.len() < total {
            tracing::warn!(
                dropped = total - records.len(),
                "ignoring unfinished matches in history"
            );
        }
        Self { records }
    }

    /// Adds a completed match as the newest entry.
    ///
    /// Returns `false`, leaving the history unchanged, if the match is still
    /// in progress.
    pub fn prepend(&mut self, record: MatchRecord) -> bool {
        if !record.is_complete() {
            tracing::warn!(id = %record.id(), "refusing to record an unfinished match");
            return false;
        }
        self.records.insert(0, record);
        true
    }

    /// Removes the entry at `index`, or returns `None` if out of bounds.
    pub fn remove(&mut self, index: usize) -> Option<MatchRecord> {
        (index < self.records.len()).then(|| self.records.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&MatchRecord> {
        self.records.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MatchRecord> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[MatchRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a MatchHistory {
    type Item = &'a MatchRecord;
    type IntoIter = std::slice::Iter<'a, MatchRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
