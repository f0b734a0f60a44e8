//! Persistence seam for the match history.
//!
//! Stores report their own errors; the helpers in this module absorb them at
//! the boundary so callers never see a failed load or save as a hard error.

use thiserror::Error;

use crate::history::MatchHistory;

/// Persistence errors surfaced by a [`HistoryStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to encode match history: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("failed to decode match history: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Load and save the full match history as one unit.
pub trait HistoryStore {
    /// Returns the stored history; `Ok(None)` when nothing was saved yet.
    fn load(&self) -> Result<Option<MatchHistory>, StoreError>;

    fn save(&mut self, history: &MatchHistory) -> Result<(), StoreError>;
}

/// Encodes a history as the JSON array stored by every backend.
pub fn encode_history(history: &MatchHistory) -> Result<String, StoreError> {
    serde_json::to_string(history).map_err(StoreError::Encode)
}

pub fn decode_history(blob: &str) -> Result<MatchHistory, StoreError> {
    serde_json::from_str(blob).map_err(StoreError::Decode)
}

/// Loads the history, treating absent or unreadable data as empty.
pub fn load_or_empty<S: HistoryStore + ?Sized>(store: &S) -> MatchHistory {
    match store.load() {
        Ok(Some(history)) => {
            tracing::debug!(matches = history.len(), "loaded match history");
            history
        }
        Ok(None) => MatchHistory::new(),
        Err(err) => {
            tracing::warn!(error = %err, "failed to load match history; starting empty");
            MatchHistory::new()
        }
    }
}

/// Saves the history, logging instead of failing. Returns whether it was saved.
pub fn save_or_warn<S: HistoryStore + ?Sized>(store: &mut S, history: &MatchHistory) -> bool {
    match store.save(history) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(error = %err, "failed to save match history; save skipped");
            false
        }
    }
}

/// In-memory store holding the encoded blob, for tests and ephemeral runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryHistoryStore {
    blob: Option<String>,
}

impl MemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-seeded with a raw blob, valid or not.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn load(&self) -> Result<Option<MatchHistory>, StoreError> {
        self.blob.as_deref().map(decode_history).transpose()
    }

    fn save(&mut self, history: &MatchHistory) -> Result<(), StoreError> {
        self.blob = Some(encode_history(history)?);
        Ok(())
    }
}
