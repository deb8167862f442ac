//! Transfers: one squad player swapped for a catalog player of the same
//! position, paid for from the user's rolling transfer budget.
//!
//! Everything happens in one IMMEDIATE transaction. The result is written as
//! the squad snapshot of the next gameweek; the squad the transfer was based
//! on is never modified.

use tracing::info;

use crate::{
    cli::types::{Gameweek, UserId},
    core::{read_json, InputSource},
    engine::validator::{squad_total_price, validate_squad, MAX_PER_CLUB, SQUAD_BUDGET},
    error::{FantasyError, Result, TransferViolation},
    storage::{queries::now_secs, FantasyDatabase, Squad},
};

use super::requests::{TransferRequest, ValidTransfer};

/// Apply a transfer made during `gameweek`. Returns the squad snapshot now
/// in effect for the next gameweek.
pub fn apply_transfer(
    db: &mut FantasyDatabase,
    gameweek: Gameweek,
    transfer: &ValidTransfer,
) -> Result<Squad> {
    let ValidTransfer {
        user_id,
        player_out,
        player_in,
    } = transfer;
    let target = gameweek.next();

    let session = db.begin_transfer()?;

    session.ensure_state(user_id, gameweek)?;
    if session.rollover_user(user_id, gameweek)? {
        info!("Weekly transfer granted to {} for GW{}", user_id, gameweek);
    }

    let available = session
        .state(user_id)?
        .map(|s| s.available_transfers)
        .unwrap_or(0);
    if available < 1 {
        return Err(TransferViolation::NoTransfersAvailable.into());
    }

    let working = session
        .squad_in_effect(user_id, target)?
        .ok_or_else(|| FantasyError::SquadNotFound {
            user_id: user_id.clone(),
            gameweek: target,
        })?;

    let outgoing = working
        .players
        .iter()
        .position(|p| p.is(player_out))
        .ok_or_else(|| FantasyError::PlayerNotInSquad {
            name: player_out.name.clone(),
            club: player_out.club.clone(),
        })?;
    let out = &working.players[outgoing];

    let incoming = session
        .catalog_player(gameweek, player_in)?
        .ok_or_else(|| FantasyError::PlayerNotFound {
            name: player_in.name.clone(),
            club: player_in.club.clone(),
        })?;

    if working.players.iter().any(|p| p.is(player_in)) {
        return Err(TransferViolation::PlayerAlreadyInSquad {
            name: player_in.name.clone(),
            club: player_in.club.clone(),
        }
        .into());
    }

    if out.position != incoming.position {
        return Err(TransferViolation::PositionMismatch {
            out_position: out.position,
            in_position: incoming.position,
        }
        .into());
    }

    let total = working.total_price - out.fantasy_price + incoming.fantasy_price;
    if total > SQUAD_BUDGET {
        return Err(TransferViolation::BudgetExceeded { total }.into());
    }

    let same_club = working
        .players
        .iter()
        .filter(|p| p.club == incoming.club)
        .count();
    let leaving = usize::from(out.club == incoming.club);
    if same_club - leaving >= MAX_PER_CLUB {
        return Err(TransferViolation::ClubLimitExceeded {
            club: incoming.club.clone(),
        }
        .into());
    }

    let mut players = working.players.clone();
    players[outgoing] = incoming;
    validate_squad(&players)?;

    session.consume_transfer(user_id)?;

    let squad = Squad {
        user_id: user_id.clone(),
        gameweek: target,
        total_price: squad_total_price(&players),
        players,
        created_at: now_secs(),
    };
    session.save_squad(&squad)?;
    session.commit()?;

    info!(
        "Transfer for {}: {} out, {} in (effective GW{})",
        user_id, player_out, player_in, target
    );
    Ok(squad)
}

/// Handle the transfer command
pub fn handle_transfer(
    db: &mut FantasyDatabase,
    gameweek: Gameweek,
    source: &InputSource,
    as_json: bool,
) -> Result<()> {
    let request: TransferRequest = read_json(source)?;
    let transfer = request.validate()?;
    let squad = apply_transfer(db, gameweek, &transfer)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&squad)?);
    } else {
        let remaining = remaining_transfers(db, &transfer.user_id)?;
        println!("Transfer made successfully");
        println!(
            "  {} out, {} in; squad for GW{} costs {:.1}M; {} transfer(s) left",
            transfer.player_out, transfer.player_in, squad.gameweek, squad.total_price, remaining
        );
    }
    Ok(())
}

fn remaining_transfers(db: &FantasyDatabase, user_id: &UserId) -> Result<u32> {
    Ok(db
        .get_transfer_state(user_id)?
        .map(|s| s.available_transfers)
        .unwrap_or(0))
}
