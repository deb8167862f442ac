//! Identifier types for users and players.

use crate::error::FantasyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for user identifiers.
///
/// Users are identified by an opaque string chosen by the caller; the engine
/// never interprets it beyond equality.
///
/// # Examples
///
/// ```rust
/// use fantasy_botola::UserId;
///
/// let user = UserId::new("HarouneTest");
/// assert_eq!(user.as_str(), "HarouneTest");
/// assert_eq!(user.to_string(), "HarouneTest");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for UserId {
    type Err = FantasyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FantasyError::MissingField {
                field: "userId".to_string(),
            });
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// Stable key for a player within a gameweek catalog: name plus club.
///
/// Two players may share a name; the club disambiguates them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerKey {
    pub name: String,
    pub club: String,
}

impl PlayerKey {
    pub fn new(name: impl Into<String>, club: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            club: club.into(),
        }
    }
}

impl fmt::Display for PlayerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.club)
    }
}
