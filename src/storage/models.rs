//! Data models for the storage layer

use crate::cli::types::{Gameweek, PlayerKey, Position, UserId};
use serde::{Deserialize, Serialize};

/// A player as read from the market-value source, before pricing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPlayer {
    pub name: String,
    pub club: String,
    pub position: Position,
    /// Real-world market value in millions
    pub market_value: f64,
}

/// A priced catalog player for one gameweek.
///
/// Squads and starting elevens hold snapshot copies of these, so a later
/// pricing pass never changes a squad that was already built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub club: String,
    pub position: Position,
    pub market_value: f64,
    pub fantasy_price: f64,
}

impl Player {
    pub fn key(&self) -> PlayerKey {
        PlayerKey::new(self.name.clone(), self.club.clone())
    }

    /// Exact (name, club) identity check.
    pub fn is(&self, key: &PlayerKey) -> bool {
        self.name == key.name && self.club == key.club
    }
}

/// A user's 15-player roster for one gameweek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Squad {
    pub user_id: UserId,
    pub gameweek: Gameweek,
    pub total_price: f64,
    pub players: Vec<Player>,
    pub created_at: u64,
}

/// Points a single lineup player earned in a gameweek.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerScore {
    #[serde(rename = "player")]
    pub player_name: String,
    pub score: i32,
}

/// The 11 players of a squad that score in a gameweek.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StartingEleven {
    /// Row identity; scoring writes back to exactly this row.
    pub id: i64,
    pub user_id: UserId,
    pub gameweek: Gameweek,
    pub total_price: f64,
    pub players: Vec<Player>,
    /// Absent until a scoring run has annotated the lineup.
    pub player_scores: Option<Vec<PlayerScore>>,
    pub created_at: u64,
}

impl StartingEleven {
    pub fn total_score(&self) -> i32 {
        self.player_scores
            .as_ref()
            .map(|scores| scores.iter().map(|s| s.score).sum())
            .unwrap_or(0)
    }
}

/// Per-user rolling transfer budget, shared across gameweeks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferState {
    pub user_id: UserId,
    pub available_transfers: u32,
    pub max_saved_transfers: u32,
    pub last_gameweek_updated: Gameweek,
}

/// Real-match statistics for one player in one gameweek.
///
/// Fields the provider did not report stay `None` and count as zero when
/// scoring.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameweekStats {
    pub player_name: String,
    pub team_name: String,
    pub goals: Option<u32>,
    pub assists: Option<u32>,
    pub minutes_played: Option<u32>,
    pub yellow_cards: Option<u32>,
    pub red_cards: Option<u32>,
    pub clean_sheet: Option<bool>,
    pub penalty_miss: Option<u32>,
    pub own_goals: Option<u32>,
}
