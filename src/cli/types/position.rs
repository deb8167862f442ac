//! Squad position types.

use crate::error::FantasyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Player positions in a fantasy squad.
///
/// Every player belongs to exactly one of the four outfield/keeper groups.
/// Squads and lineups are constrained by how many of each they hold.
///
/// # Examples
///
/// ```rust
/// use fantasy_botola::Position;
///
/// let gk: Position = "gk".parse().unwrap();
/// assert_eq!(gk, Position::GK);
/// assert_eq!(Position::FWD.to_string(), "FWD");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Position {
    GK,
    DEF,
    MID,
    FWD,
}

impl Position {
    /// All positions in squad order.
    pub const ALL: [Position; 4] = [Position::GK, Position::DEF, Position::MID, Position::FWD];

    pub fn as_str(&self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::DEF => "DEF",
            Position::MID => "MID",
            Position::FWD => "FWD",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Position {
    type Err = FantasyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GK" => Ok(Position::GK),
            "DEF" => Ok(Position::DEF),
            "MID" => Ok(Position::MID),
            "FWD" => Ok(Position::FWD),
            _ => Err(FantasyError::InvalidPosition {
                position: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = FantasyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(position: Position) -> Self {
        position.as_str().to_string()
    }
}
