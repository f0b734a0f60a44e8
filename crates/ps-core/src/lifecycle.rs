//! Match lifecycle: start, live updates, completion and history edits.
//!
//! The manager exclusively owns the active [`MatchRecord`]. Completing a
//! match moves a copy into the [`MatchHistory`] and clears the active slot,
//! so no record is ever mutable from two places at once.
//!
//! Operations that need an active match are no-ops without one. Starting a
//! match while another is active is rejected rather than silently replacing
//! the running match.

use std::fmt;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::game::GameScore;
use crate::history::MatchHistory;
use crate::record::{MatchId, MatchRecord};
use crate::stats::MatchStatistics;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("match {id} is already in progress")]
    MatchAlreadyActive { id: MatchId },
}

/// Change notifications delivered to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchEvent {
    Started { id: MatchId },
    Completed { record: MatchRecord },
    Discarded { id: MatchId },
    Deleted { index: usize, id: MatchId },
}

type Listener = Box<dyn FnMut(&MatchEvent) + Send>;

pub struct MatchLifecycleManager {
    active: Option<MatchRecord>,
    history: MatchHistory,
    listeners: Vec<Listener>,
}

impl fmt::Debug for MatchLifecycleManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchLifecycleManager")
            .field("active", &self.active)
            .field("history_len", &self.history.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for MatchLifecycleManager {
    fn default() -> Self {
        Self::new(MatchHistory::new())
    }
}

impl MatchLifecycleManager {
    /// Creates a manager over a previously loaded history.
    pub const fn new(history: MatchHistory) -> Self {
        Self {
            active: None,
            history,
            listeners: Vec::new(),
        }
    }

    /// Registers a callback invoked after every lifecycle change.
    pub fn subscribe(&mut self, listener: impl FnMut(&MatchEvent) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self, event: &MatchEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }

    pub const fn active(&self) -> Option<&MatchRecord> {
        self.active.as_ref()
    }

    pub const fn is_match_active(&self) -> bool {
        self.active.is_some()
    }

    pub const fn history(&self) -> &MatchHistory {
        &self.history
    }

    pub fn statistics(&self) -> MatchStatistics {
        MatchStatistics::from_records(self.history.as_slice())
    }

    pub fn start_new_match(&mut self) -> Result<&MatchRecord, LifecycleError> {
        self.start_new_match_at(Utc::now())
    }

    /// Starts a match at `now`. Fails if a match is already running.
    pub fn start_new_match_at(
        &mut self,
        now: DateTime<Utc>,
    ) -> Result<&MatchRecord, LifecycleError> {
        if let Some(active) = &self.active {
            return Err(LifecycleError::MatchAlreadyActive { id: active.id() });
        }

        let record = MatchRecord::new(now);
        let id = record.id();
        tracing::debug!(%id, "match started");
        self.notify(&MatchEvent::Started { id });
        Ok(self.active.insert(record))
    }

    /// Pushes the live score and elapsed time into the active match.
    ///
    /// Returns `false` when no match is active.
    pub fn update_active(&mut self, games: GameScore, elapsed_secs: f64) -> bool {
        match self.active.as_mut() {
            Some(record) => record.apply_update(games, elapsed_secs),
            None => {
                tracing::debug!("update ignored: no active match");
                false
            }
        }
    }

    pub fn complete_active_match(&mut self) -> Option<MatchRecord> {
        self.complete_active_match_at(Utc::now())
    }

    /// Finalizes the active match at `now` and prepends it to the history.
    pub fn complete_active_match_at(&mut self, now: DateTime<Utc>) -> Option<MatchRecord> {
        let Some(mut record) = self.active.take() else {
            tracing::debug!("complete ignored: no active match");
            return None;
        };

        record.complete(now);
        self.history.prepend(record.clone());
        tracing::debug!(
            id = %record.id(),
            games_a = record.team_a_games(),
            games_b = record.team_b_games(),
            duration_secs = record.duration_secs(),
            "match completed"
        );
        self.notify(&MatchEvent::Completed {
            record: record.clone(),
        });
        Some(record)
    }

    /// Drops the active match without recording it.
    pub fn discard_active_match(&mut self) -> Option<MatchRecord> {
        let record = self.active.take()?;
        tracing::debug!(id = %record.id(), "match discarded");
        self.notify(&MatchEvent::Discarded { id: record.id() });
        Some(record)
    }

    /// Removes a history entry by position. Out-of-range indexes are a no-op.
    pub fn delete_from_history(&mut self, index: usize) -> Option<MatchRecord> {
        let Some(record) = self.history.remove(index) else {
            tracing::debug!(index, len = self.history.len(), "delete ignored: index out of range");
            return None;
        };
        self.notify(&MatchEvent::Deleted {
            index,
            id: record.id(),
        });
        Some(record)
    }
}
