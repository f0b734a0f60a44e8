//! CLI subcommand implementations.

pub mod authorize;
pub mod delete;
pub mod history;
pub mod play;
pub mod stats;

use ps_core::{MatchHistory, load_or_empty, save_or_warn};
use ps_db::Database;

use crate::Config;

/// Opens the match database, logging and returning `None` if it is unusable.
///
/// Commands keep working on an empty history without it.
pub(crate) fn open_database(config: &Config) -> Option<Database> {
    match Database::open(&config.database_path) {
        Ok(db) => Some(db),
        Err(err) => {
            tracing::warn!(
                path = %config.database_path.display(),
                error = %err,
                "failed to open match database; continuing without saved history"
            );
            None
        }
    }
}

pub(crate) fn load_history(db: Option<&Database>) -> MatchHistory {
    db.map_or_else(MatchHistory::new, load_or_empty)
}

/// Saves the history if a database is open. Returns whether it was saved.
pub(crate) fn save_history(db: Option<&mut Database>, history: &MatchHistory) -> bool {
    db.is_some_and(|db| save_or_warn(db, history))
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{Duration, TimeZone, Utc};
    use ps_core::{GameScore, HistoryStore, MatchHistory, MatchLifecycleManager};
    use ps_db::Database;

    use crate::Config;

    /// Replaces the database file with bytes SQLite cannot read.
    pub fn corrupt_database(config: &Config) {
        std::fs::write(
            &config.database_path,
            "this file is not a database, whatever the extension says.\n".repeat(8),
        )
        .unwrap();
    }

    pub fn test_config(temp: &tempfile::TempDir) -> Config {
        Config {
            database_path: temp.path().join("padel.db"),
            sync_endpoint: None,
            api_key: None,
        }
    }

    /// Saves three completed matches (6-4, 3-6, 5-5) on consecutive days.
    pub fn seed_history(config: &Config) -> MatchHistory {
        let mut manager = MatchLifecycleManager::default();
        let start = Utc.with_ymd_and_hms(2025, 11, 16, 18, 0, 0).unwrap();
        let matches = [
            (GameScore { a: 6, b: 4 }, 3600.0),
            (GameScore { a: 3, b: 6 }, 2700.0),
            (GameScore { a: 5, b: 5 }, 4000.0),
        ];
        for (day, (games, secs)) in matches.into_iter().enumerate() {
            let day_start = start + Duration::days(i64::try_from(day).unwrap());
            manager.start_new_match_at(day_start).unwrap();
            manager.update_active(games, secs);
            manager
                .complete_active_match_at(day_start + Duration::hours(1))
                .unwrap();
        }
        let mut db = Database::open(&config.database_path).unwrap();
        db.save(manager.history()).unwrap();
        manager.history().clone()
    }
}
