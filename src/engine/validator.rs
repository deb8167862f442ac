//! Squad legality rules.
//!
//! [`validate_squad`] is the single source of truth for whether a 15-player
//! roster is legal. Squad creation and every transfer candidate go through it
//! before anything is written.

use std::collections::HashMap;

use crate::cli::types::Position;
use crate::error::SquadViolation;
use crate::storage::Player;

pub const SQUAD_SIZE: usize = 15;
pub const SQUAD_BUDGET: f64 = 100.0;
pub const MAX_PER_CLUB: usize = 3;

/// Required number of players per position in a full squad.
pub fn required_count(position: Position) -> usize {
    match position {
        Position::GK => 2,
        Position::DEF => 5,
        Position::MID => 5,
        Position::FWD => 3,
    }
}

pub fn squad_total_price(players: &[Player]) -> f64 {
    players.iter().map(|p| p.fantasy_price).sum()
}

/// Count players per club, keeping clubs in order of first appearance.
pub fn club_counts(players: &[Player]) -> Vec<(&str, usize)> {
    let mut order: Vec<(&str, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for player in players {
        match index.get(player.club.as_str()) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(player.club.as_str(), order.len());
                order.push((player.club.as_str(), 1));
            }
        }
    }
    order
}

/// Check a squad against the size, position, club and budget rules, in that order.
pub fn validate_squad(players: &[Player]) -> Result<(), SquadViolation> {
    if players.len() != SQUAD_SIZE {
        return Err(SquadViolation::WrongPlayerCount {
            found: players.len(),
        });
    }

    for position in Position::ALL {
        let expected = required_count(position);
        let found = players.iter().filter(|p| p.position == position).count();
        if found != expected {
            return Err(SquadViolation::PositionCount {
                position,
                expected,
                found,
            });
        }
    }

    if let Some((club, count)) = club_counts(players)
        .into_iter()
        .find(|(_, count)| *count > MAX_PER_CLUB)
    {
        return Err(SquadViolation::ClubLimit {
            club: club.to_string(),
            count,
        });
    }

    let total = squad_total_price(players);
    if total > SQUAD_BUDGET {
        return Err(SquadViolation::OverBudget {
            total,
            overage: total - SQUAD_BUDGET,
        });
    }

    Ok(())
}
