//! Payload types of the statistics provider

use serde::{Deserialize, Serialize};

use crate::storage::GameweekStats;


/// `{ "name": ... }` reference used for players and teams
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct NamedRef {
    pub name: String,
}

/// One player row of a statistics page.
///
/// Each endpoint only reports the fields it was asked for, so every counter
/// is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatRecord {
    pub player: NamedRef,
    #[serde(default)]
    pub team: Option<NamedRef>,
    #[serde(default)]
    pub goals: Option<u32>,
    #[serde(default)]
    pub assists: Option<u32>,
    #[serde(default)]
    pub minutes_played: Option<u32>,
    #[serde(default)]
    pub yellow_cards: Option<u32>,
    #[serde(default)]
    pub red_cards: Option<u32>,
    #[serde(default)]
    pub clean_sheet: Option<bool>,
    #[serde(default)]
    pub penalty_miss: Option<u32>,
    #[serde(default)]
    pub own_goals: Option<u32>,
}

/// Envelope of a statistics page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsPage {
    #[serde(default)]
    pub results: Vec<StatRecord>,
}

impl From<StatRecord> for GameweekStats {
    fn from(record: StatRecord) -> Self {
        Self {
            player_name: record.player.name,
            team_name: record.team.map(|t| t.name).unwrap_or_default(),
            goals: record.goals,
            assists: record.assists,
            minutes_played: record.minutes_played,
            yellow_cards: record.yellow_cards,
            red_cards: record.red_cards,
            clean_sheet: record.clean_sheet,
            penalty_miss: record.penalty_miss,
            own_goals: record.own_goals,
        }
    }
}
