//! Formation rules for a starting eleven.

use crate::cli::types::Position;
use crate::error::LineupViolation;
use crate::storage::Player;

pub const LINEUP_SIZE: usize = 11;

/// Minimum number of starters per outfield position.
pub fn minimum_starters(position: Position) -> usize {
    match position {
        Position::GK => 1,
        Position::DEF => 3,
        Position::MID => 2,
        Position::FWD => 1,
    }
}

/// Exactly one goalkeeper, at least 3 DEF, 2 MID and 1 FWD, 11 in total.
pub fn validate_formation(players: &[Player]) -> Result<(), LineupViolation> {
    if players.len() != LINEUP_SIZE {
        return Err(LineupViolation::WrongPlayerCount {
            found: players.len(),
        });
    }

    let count = |position: Position| players.iter().filter(|p| p.position == position).count();

    let goalkeepers = count(Position::GK);
    if goalkeepers != 1 {
        return Err(LineupViolation::GoalkeeperCount { found: goalkeepers });
    }

    for position in [Position::DEF, Position::MID, Position::FWD] {
        let min = minimum_starters(position);
        let found = count(position);
        if found < min {
            return Err(LineupViolation::TooFew {
                position,
                min,
                found,
            });
        }
    }

    Ok(())
}
