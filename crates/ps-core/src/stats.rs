//! Lifetime statistics derived from the match history.
//!
//! Every figure is a read-only fold over the history and recomputed on
//! demand; nothing is cached between reads.

use serde::Serialize;

use crate::format::{format_minutes, format_play_time};
use crate::record::MatchRecord;

pub fn total_matches(records: &[MatchRecord]) -> usize {
    records.len()
}

/// Sum of match durations in seconds.
pub fn total_play_time(records: &[MatchRecord]) -> f64 {
    records.iter().map(MatchRecord::duration_secs).sum()
}

pub fn total_games(records: &[MatchRecord]) -> u64 {
    records.iter().map(MatchRecord::total_games).sum()
}

/// Sum of estimated energy, truncated to an integer.
#[allow(clippy::cast_possible_truncation)]
pub fn total_energy(records: &[MatchRecord]) -> i64 {
    records
        .iter()
        .map(MatchRecord::estimated_energy)
        .sum::<f64>()
        .trunc() as i64
}

/// Mean match duration in seconds; zero for an empty history.
#[allow(clippy::cast_precision_loss)]
pub fn average_duration(records: &[MatchRecord]) -> f64 {
    if records.is_empty() {
        return 0.0;
    }
    total_play_time(records) / records.len() as f64
}

/// Snapshot of all lifetime figures.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MatchStatistics {
    pub total_matches: usize,
    pub total_play_time_secs: f64,
    pub total_games: u64,
    pub total_energy: i64,
    pub average_duration_secs: f64,
}

impl MatchStatistics {
    pub fn from_records(records: &[MatchRecord]) -> Self {
        Self {
            total_matches: total_matches(records),
            total_play_time_secs: total_play_time(records),
            total_games: total_games(records),
            total_energy: total_energy(records),
            average_duration_secs: average_duration(records),
        }
    }

    /// Total play time as `Xh Ym` or `Xm`.
    pub fn total_play_time_formatted(&self) -> String {
        format_play_time(self.total_play_time_secs)
    }

    /// Average duration in whole minutes; `0m` with no matches.
    pub fn average_duration_formatted(&self) -> String {
        format_minutes(self.average_duration_secs)
    }
}
