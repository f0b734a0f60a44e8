//! Point scoring within a single game.
//!
//! Points are tracked as raw counts per team and rendered as the
//! traditional 0/15/30/40/AD labels. Once both teams reach three points the
//! game is in deuce and a two-point margin is needed to win it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::team::Team;

/// Minimum number of points needed to take a game.
const POINTS_TO_WIN: u32 = 4;

/// Winning margin required over the opponent.
const WIN_MARGIN: u32 = 2;

/// Point count at which both teams being level or above means deuce.
const DEUCE_THRESHOLD: u32 = 3;

/// Label shown for a team's point score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointDisplay {
    #[serde(rename = "0")]
    Love,
    #[serde(rename = "15")]
    Fifteen,
    #[serde(rename = "30")]
    Thirty,
    #[serde(rename = "40")]
    Forty,
    #[serde(rename = "AD")]
    Advantage,
}

impl PointDisplay {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Love => "0",
            Self::Fifteen => "15",
            Self::Thirty => "30",
            Self::Forty => "40",
            Self::Advantage => "AD",
        }
    }
}

impl fmt::Display for PointDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point counts for the game in progress.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointScoreEngine {
    a: u32,
    b: u32,
}

impl PointScoreEngine {
    pub const fn new() -> Self {
        Self { a: 0, b: 0 }
    }

    /// Raw point count for a team.
    #[must_use]
    pub const fn points(&self, team: Team) -> u32 {
        match team {
            Team::A => self.a,
            Team::B => self.b,
        }
    }

    const fn points_mut(&mut self, team: Team) -> &mut u32 {
        match team {
            Team::A => &mut self.a,
            Team::B => &mut self.b,
        }
    }

    pub fn award_point(&mut self, team: Team) {
        let points = self.points_mut(team);
        *points = points.saturating_add(1);
    }

    /// Takes a point back from `team`. Returns `false` if it had none.
    pub fn revoke_point(&mut self, team: Team) -> bool {
        let points = self.points_mut(team);
        if *points == 0 {
            return false;
        }
        *points -= 1;
        true
    }

    /// Both teams have at least three points.
    #[must_use]
    pub const fn is_deuce(&self) -> bool {
        self.a >= DEUCE_THRESHOLD && self.b >= DEUCE_THRESHOLD
    }

    /// The label shown for `team`.
    ///
    /// In deuce the leader shows "AD" and everyone else shows "40", which
    /// includes the trailing team while the opponent holds advantage.
    #[must_use]
    pub const fn display_value(&self, team: Team) -> PointDisplay {
        let points = self.points(team);
        if self.is_deuce() {
            return if points > self.points(team.opponent()) {
                PointDisplay::Advantage
            } else {
                PointDisplay::Forty
            };
        }
        match points {
            0 => PointDisplay::Love,
            1 => PointDisplay::Fifteen,
            2 => PointDisplay::Thirty,
            _ => PointDisplay::Forty,
        }
    }

    /// At least four points and two clear of the opponent.
    #[must_use]
    pub const fn has_won(&self, team: Team) -> bool {
        let points = self.points(team);
        points >= POINTS_TO_WIN && points >= self.points(team.opponent()) + WIN_MARGIN
    }

    pub const fn reset(&mut self) {
        self.a = 0;
        self.b = 0;
    }
}
