//! Gameweek type: the scheduling round that scopes every per-week collection.

use crate::error::{FantasyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Type-safe wrapper for gameweek numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gameweek(pub u16);

impl Gameweek {
    pub fn new(gameweek: u16) -> Self {
        Self(gameweek)
    }

    pub fn as_u16(&self) -> u16 {
        self.0
    }

    /// The round after this one. Transfers made now take effect here.
    pub fn next(&self) -> Self {
        Self(self.0.saturating_add(1))
    }
}

impl Default for Gameweek {
    fn default() -> Self {
        Self(1)
    }
}

impl fmt::Display for Gameweek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Gameweek {
    type Err = FantasyError;

    fn from_str(s: &str) -> Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}
