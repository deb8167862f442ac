//! Weekly transfer rollover.

use tracing::info;

use crate::{cli::types::Gameweek, error::Result, storage::FantasyDatabase};

/// Grant one transfer (capped at each user's maximum) to every user not yet
/// updated for `gameweek`. Returns how many users were updated.
pub fn rollover(db: &mut FantasyDatabase, gameweek: Gameweek) -> Result<usize> {
    let updated = db.rollover_all(gameweek)?;
    info!("Transfer rollover for GW{}: {} users updated", gameweek, updated);
    Ok(updated)
}

/// Handle the rollover command
pub fn handle_rollover(db: &mut FantasyDatabase, gameweek: Gameweek) -> Result<()> {
    let updated = rollover(db, gameweek)?;
    println!("Transfers updated for {} users (GW{})", updated, gameweek);
    Ok(())
}
