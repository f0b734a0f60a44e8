//! A single played match.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::format::format_clock;
use crate::game::GameScore;
use crate::team::Team;

/// Energy units (kcal) credited per hour of match time.
pub const ENERGY_PER_HOUR: f64 = 500.0;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Estimated energy expenditure for a match of the given length.
///
/// Constant-rate model, always derived from the full duration.
#[must_use]
pub fn estimated_energy(duration_secs: f64) -> f64 {
    duration_secs / SECONDS_PER_HOUR * ENERGY_PER_HOUR
}

/// Unique match identifier (UUID).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchId(Uuid);

impl MatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of a completed match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(Team),
    Draw,
}

impl fmt::Display for MatchOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner(team) => write!(f, "{team}"),
            Self::Draw => f.write_str("Draw"),
        }
    }
}

/// Errors for records that break the completion invariant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    #[error("match {id} is complete but has no end time")]
    MissingEndTime { id: MatchId },
    #[error("match {id} has an end time but is not complete")]
    UnexpectedEndTime { id: MatchId },
}

/// One played match.
///
/// `end_time` is set exactly when `is_complete` is true. Once complete the
/// record is frozen: duration and energy no longer change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawMatchRecord")]
pub struct MatchRecord {
    id: MatchId,
    team_a_games: u32,
    team_b_games: u32,
    start_time: DateTime<Utc>,
    end_time: Option<DateTime<Utc>>,
    /// Elapsed seconds.
    duration: f64,
    is_complete: bool,
    estimated_energy: f64,
}

/// Unvalidated wire form of [`MatchRecord`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawMatchRecord {
    id: MatchId,
    team_a_games: u32,
    team_b_games: u32,
    start_time: DateTime<Utc>,
    #[serde(default)]
    end_time: Option<DateTime<Utc>>,
    duration: f64,
    is_complete: bool,
    #[serde(alias = "estimatedCalories")]
    estimated_energy: f64,
}

impl TryFrom<RawMatchRecord> for MatchRecord {
    type Error = RecordError;

    fn try_from(raw: RawMatchRecord) -> Result<Self, Self::Error> {
        match (raw.is_complete, raw.end_time.is_some()) {
            (true, false) => return Err(RecordError::MissingEndTime { id: raw.id }),
            (false, true) => return Err(RecordError::UnexpectedEndTime { id: raw.id }),
            _ => {}
        }
        Ok(Self {
            id: raw.id,
            team_a_games: raw.team_a_games,
            team_b_games: raw.team_b_games,
            start_time: raw.start_time,
            end_time: raw.end_time,
            duration: raw.duration,
            is_complete: raw.is_complete,
            estimated_energy: raw.estimated_energy,
        })
    }
}

impl MatchRecord {
    /// A fresh, active record starting at `start_time`.
    pub fn new(start_time: DateTime<Utc>) -> Self {
        Self {
            id: MatchId::new(),
            team_a_games: 0,
            team_b_games: 0,
            start_time,
            end_time: None,
            duration: 0.0,
            is_complete: false,
            estimated_energy: 0.0,
        }
    }

    pub const fn id(&self) -> MatchId {
        self.id
    }

    pub const fn team_a_games(&self) -> u32 {
        self.team_a_games
    }

    pub const fn team_b_games(&self) -> u32 {
        self.team_b_games
    }

    pub const fn score(&self) -> GameScore {
        GameScore {
            a: self.team_a_games,
            b: self.team_b_games,
        }
    }

    pub fn total_games(&self) -> u64 {
        self.score().total()
    }

    pub const fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub const fn end_time(&self) -> Option<DateTime<Utc>> {
        self.end_time
    }

    /// Elapsed match time in seconds.
    pub const fn duration_secs(&self) -> f64 {
        self.duration
    }

    pub const fn estimated_energy(&self) -> f64 {
        self.estimated_energy
    }

    pub const fn is_complete(&self) -> bool {
        self.is_complete
    }

    /// Winner of a completed match; `None` while the match is running.
    pub const fn outcome(&self) -> Option<MatchOutcome> {
        if !self.is_complete {
            return None;
        }
        Some(if self.team_a_games > self.team_b_games {
            MatchOutcome::Winner(Team::A)
        } else if self.team_b_games > self.team_a_games {
            MatchOutcome::Winner(Team::B)
        } else {
            MatchOutcome::Draw
        })
    }

    /// Duration as `M:SS`, or `H:MM:SS` past the hour.
    pub fn duration_formatted(&self) -> String {
        format_clock(self.duration)
    }

    /// Applies a live update. Returns `false` if the record is frozen.
    ///
    /// The duration never moves backwards: a smaller or non-finite
    /// `elapsed_secs` leaves it unchanged while the game counts still update.
    pub(crate) fn apply_update(&mut self, games: GameScore, elapsed_secs: f64) -> bool {
        if self.is_complete {
            return false;
        }
        self.team_a_games = games.a;
        self.team_b_games = games.b;
        if elapsed_secs.is_finite() && elapsed_secs >= self.duration {
            self.duration = elapsed_secs;
        } else {
            tracing::warn!(
                id = %self.id,
                elapsed_secs,
                current = self.duration,
                "ignoring non-monotonic match duration"
            );
        }
        self.estimated_energy = estimated_energy(self.duration);
        true
    }

    /// Freezes the record. Returns `false` if it was already complete.
    pub(crate) fn complete(&mut self, end_time: DateTime<Utc>) -> bool {
        if self.is_complete {
            return false;
        }
        self.end_time = Some(end_time);
        self.is_complete = true;
        true
    }
}
