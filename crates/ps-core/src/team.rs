//! The two sides of a match.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One side of the court.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    /// Both teams, in display order.
    pub const ALL: [Self; 2] = [Self::A, Self::B];

    /// The team on the other side of the net.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::A => Self::B,
            Self::B => Self::A,
        }
    }

    /// Short label used in scoreboards and input parsing.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Team {}", self.as_str())
    }
}

impl FromStr for Team {
    type Err = UnknownTeam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "a" | "A" => Ok(Self::A),
            "b" | "B" => Ok(Self::B),
            _ => Err(UnknownTeam(s.to_string())),
        }
    }
}

/// Error type for strings that do not name a team.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown team: {0}")]
pub struct UnknownTeam(String);
