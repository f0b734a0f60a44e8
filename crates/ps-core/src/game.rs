//! Game scoring across a match.

use serde::{Deserialize, Serialize};

use crate::point::{PointDisplay, PointScoreEngine};
use crate::team::Team;

/// Games won by each team in the current match.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameScore {
    pub a: u32,
    pub b: u32,
}

impl GameScore {
    #[must_use]
    pub const fn games(&self, team: Team) -> u32 {
        match team {
            Team::A => self.a,
            Team::B => self.b,
        }
    }

    /// Games played; widened so any pair of counts fits.
    #[must_use]
    pub fn total(&self) -> u64 {
        u64::from(self.a) + u64::from(self.b)
    }
}

/// What a single point did to the score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointOutcome {
    /// The point was added to the game in progress.
    Point { team: Team },
    /// The point won the game; point scores are back to 0-0.
    Game { team: Team },
}

/// Tracks games won plus the point score of the game in progress.
///
/// Only the most recent point can be undone, and only while its game is
/// still running: once a point wins a game the point score has been reset
/// and there is nothing left to take back.
#[derive(Debug, Clone, Default)]
pub struct GameScoreTracker {
    games: GameScore,
    points: PointScoreEngine,
    last_scorer: Option<Team>,
}

impl GameScoreTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn score(&self) -> GameScore {
        self.games
    }

    pub const fn points(&self) -> &PointScoreEngine {
        &self.points
    }

    pub const fn display_value(&self, team: Team) -> PointDisplay {
        self.points.display_value(team)
    }

    pub const fn last_scorer(&self) -> Option<Team> {
        self.last_scorer
    }

    pub fn point_won_by(&mut self, team: Team) -> PointOutcome {
        self.last_scorer = Some(team);
        self.points.award_point(team);

        if !self.points.has_won(team) {
            return PointOutcome::Point { team };
        }

        match team {
            Team::A => self.games.a += 1,
            Team::B => self.games.b += 1,
        }
        self.points.reset();
        tracing::debug!(%team, games_a = self.games.a, games_b = self.games.b, "game won");
        PointOutcome::Game { team }
    }

    /// Takes back the most recent point of the game in progress.
    ///
    /// Returns `true` if a point was removed. A second call without a new
    /// point in between does nothing.
    pub fn undo_last_point(&mut self) -> bool {
        let Some(team) = self.last_scorer else {
            return false;
        };
        if !self.points.revoke_point(team) {
            return false;
        }
        self.last_scorer = None;
        tracing::debug!(%team, "point undone");
        true
    }

    pub fn reset_match(&mut self) {
        self.games = GameScore::default();
        self.points.reset();
        self.last_scorer = None;
    }
}
