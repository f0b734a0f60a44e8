//! Core domain logic for the padel score tracker.
//!
//! This crate contains the fundamental types and logic for:
//! - Point scoring: converting "point won by team X" into 0/15/30/40/AD
//! - Game scoring: accumulating won games and undoing the last point
//! - Match lifecycle: starting, updating, completing and deleting matches
//! - Statistics: lifetime figures derived from the match history

pub mod format;
pub mod game;
pub mod history;
pub mod lifecycle;
pub mod point;
pub mod record;
pub mod stats;
pub mod store;
pub mod team;

pub use game::{GameScore, GameScoreTracker, PointOutcome};
pub use history::MatchHistory;
pub use lifecycle::{LifecycleError, MatchEvent, MatchLifecycleManager};
pub use point::{PointDisplay, PointScoreEngine};
pub use record::{
    ENERGY_PER_HOUR, MatchId, MatchOutcome, MatchRecord, RecordError, estimated_energy,
};
pub use stats::MatchStatistics;
pub use store::{HistoryStore, MemoryHistoryStore, StoreError, load_or_empty, save_or_warn};
pub use team::{Team, UnknownTeam};
