//! Fantasy points from real-match statistics.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::matcher::{team_matches_club, NameIndex, NameMatcher};
use crate::cli::types::Position;
use crate::storage::{GameweekStats, Player, PlayerScore};

/// A candidate name must score strictly above this to count as a match.
pub const MATCH_THRESHOLD: f64 = 0.5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinutesRules {
    pub up_to_60: i32,
    pub more_than_60: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct PositionRates {
    pub gk: i32,
    pub def: i32,
    pub mid: i32,
    pub fwd: i32,
}

impl PositionRates {
    pub fn for_position(&self, position: Position) -> i32 {
        match position {
            Position::GK => self.gk,
            Position::DEF => self.def,
            Position::MID => self.mid,
            Position::FWD => self.fwd,
        }
    }
}

/// Point values per event. Loadable from JSON to override the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ScoringRules {
    pub minutes_played: MinutesRules,
    pub goals: PositionRates,
    pub assists: i32,
    pub clean_sheet: PositionRates,
    pub penalty_miss: i32,
    pub yellow_card: i32,
    pub red_card: i32,
    pub own_goal: i32,
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self {
            minutes_played: MinutesRules {
                up_to_60: 1,
                more_than_60: 2,
            },
            goals: PositionRates {
                gk: 10,
                def: 6,
                mid: 5,
                fwd: 4,
            },
            assists: 3,
            clean_sheet: PositionRates {
                gk: 4,
                def: 4,
                mid: 1,
                fwd: 0,
            },
            penalty_miss: -2,
            yellow_card: -1,
            red_card: -3,
            own_goal: -2,
        }
    }
}

/// Normalized counts for one player's gameweek. Missing provider fields are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchStats {
    pub minutes_played: u32,
    pub goals: u32,
    pub assists: u32,
    pub clean_sheet: bool,
    pub penalty_miss: u32,
    pub yellow_cards: u32,
    pub red_cards: u32,
    pub own_goals: u32,
}

impl From<&GameweekStats> for MatchStats {
    fn from(stats: &GameweekStats) -> Self {
        Self {
            minutes_played: stats.minutes_played.unwrap_or(0),
            goals: stats.goals.unwrap_or(0),
            assists: stats.assists.unwrap_or(0),
            clean_sheet: stats.clean_sheet.unwrap_or(false),
            penalty_miss: stats.penalty_miss.unwrap_or(0),
            yellow_cards: stats.yellow_cards.unwrap_or(0),
            red_cards: stats.red_cards.unwrap_or(0),
            own_goals: stats.own_goals.unwrap_or(0),
        }
    }
}

pub fn score_player(position: Position, stats: &MatchStats, rules: &ScoringRules) -> i32 {
    let mut score = 0;

    if stats.minutes_played >= 60 {
        score += rules.minutes_played.more_than_60;
    } else if stats.minutes_played > 0 {
        score += rules.minutes_played.up_to_60;
    }

    if stats.goals > 0 {
        score += stats.goals as i32 * rules.goals.for_position(position);
    }

    score += stats.assists as i32 * rules.assists;

    if stats.clean_sheet {
        score += rules.clean_sheet.for_position(position);
    }

    score += stats.penalty_miss as i32 * rules.penalty_miss;
    score += stats.yellow_cards as i32 * rules.yellow_card;
    score += stats.red_cards as i32 * rules.red_card;
    score += stats.own_goals as i32 * rules.own_goal;

    score
}

/// Find the statistics record for a lineup player.
///
/// The best fuzzy name match must clear [`MATCH_THRESHOLD`] and a record with
/// that name must belong to a team whose name contains the player's club.
pub fn find_player_stats<'s, M: NameMatcher>(
    player: &Player,
    index: &NameIndex<M>,
    stats: &'s [GameweekStats],
) -> Option<&'s GameweekStats> {
    let found = index.best_match(&player.name)?;
    if found.score <= MATCH_THRESHOLD {
        debug!(
            "No confident match for {} (best {} at {:.2})",
            player.name, found.candidate, found.score
        );
        return None;
    }
    stats
        .iter()
        .find(|s| s.player_name == found.candidate && team_matches_club(&s.team_name, &player.club))
}

/// Score every player of a lineup, in lineup order. Unmatched players score as
/// if they did not play.
pub fn score_lineup<M: NameMatcher>(
    players: &[Player],
    index: &NameIndex<M>,
    stats: &[GameweekStats],
    rules: &ScoringRules,
) -> Vec<PlayerScore> {
    players
        .iter()
        .map(|player| {
            let match_stats = find_player_stats(player, index, stats)
                .map(MatchStats::from)
                .unwrap_or_default();
            PlayerScore {
                player_name: player.name.clone(),
                score: score_player(player.position, &match_stats, rules),
            }
        })
        .collect()
}
