//! Storage layer for the padel score tracker.
//!
//! Provides a small key-value blob store on top of `rusqlite`. The match
//! history is kept as a single JSON blob under [`HISTORY_KEY`], matching the
//! shape every [`HistoryStore`] uses.
//!
//! # Thread Safety
//!
//! The [`Database`] type wraps a `rusqlite::Connection`, which is `Send` but not `Sync`.
//! A `Database` can be moved between threads but needs external
//! synchronization (e.g. a `Mutex<Database>`) to be shared. History writes
//! and statistics reads then stay mutually exclusive.
//!
//! # Schema
//!
//! Timestamps are stored as TEXT in RFC 3339 format (e.g., `2025-11-16T18:00:00Z`).

use std::path::Path;

use chrono::{SecondsFormat, Utc};
use rusqlite::{Connection, OptionalExtension, params};
use thiserror::Error;

use ps_core::store::{decode_history, encode_history};
use ps_core::{HistoryStore, MatchHistory, StoreError};

/// Key under which the match history blob is stored.
pub const HISTORY_KEY: &str = "saved_matches";

/// Database errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// An error from the underlying database.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        Self::Backend(Box::new(err))
    }
}

/// Database connection wrapper.
///
/// See the [module documentation](self) for thread safety considerations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a database at the given path, creating it if necessary.
    ///
    /// The database schema is automatically initialized on first open.
    pub fn open(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Opens an in-memory database.
    ///
    /// Useful for testing. The database is destroyed when the connection closes.
    pub fn open_in_memory() -> Result<Self, DbError> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initializes the database schema.
    ///
    /// This is idempotent - safe to call on an already-initialized database.
    fn init(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS blobs (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            ",
        )?;
        Ok(())
    }

    /// Returns the blob stored under `key`, if any.
    pub fn get_blob(&self, key: &str) -> Result<Option<String>, DbError> {
        let value = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?", [key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    /// Inserts or replaces the blob stored under `key`.
    pub fn put_blob(&self, key: &str, value: &str) -> Result<(), DbError> {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
        self.conn.execute(
            "
            INSERT INTO blobs (key, value, updated_at) VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            ",
            params![key, value, now],
        )?;
        Ok(())
    }

    /// Removes the blob under `key`. Returns whether anything was deleted.
    pub fn delete_blob(&self, key: &str) -> Result<bool, DbError> {
        let deleted = self.conn.execute("DELETE FROM blobs WHERE key = ?", [key])?;
        Ok(deleted > 0)
    }
}

impl HistoryStore for Database {
    fn load(&self) -> Result<Option<MatchHistory>, StoreError> {
        let Some(blob) = self.get_blob(HISTORY_KEY)? else {
            return Ok(None);
        };
        decode_history(&blob).map(Some)
    }

    fn save(&mut self, history: &MatchHistory) -> Result<(), StoreError> {
        let blob = encode_history(history)?;
        self.put_blob(HISTORY_KEY, &blob)?;
        tracing::debug!(matches = history.len(), "saved match history");
        Ok(())
    }
}
