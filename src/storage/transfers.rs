//! Transfer budget state and the transactional transfer session

use super::{
    models::{Player, Squad, TransferState},
    queries::{select_catalog_player, select_squad_in_effect, write_squad_snapshot},
    schema::FantasyDatabase,
};
use crate::cli::types::{Gameweek, PlayerKey, UserId};
use crate::error::{Result, TransferViolation};
use rusqlite::{params, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};
use tracing::debug;

/// Transfers a brand-new user starts with.
pub const INITIAL_TRANSFERS: u32 = 1;
/// Default ceiling on banked transfers.
pub const DEFAULT_MAX_SAVED_TRANSFERS: u32 = 2;

fn row_to_state(row: &Row) -> rusqlite::Result<TransferState> {
    Ok(TransferState {
        user_id: UserId::new(row.get::<_, String>(0)?),
        available_transfers: row.get(1)?,
        max_saved_transfers: row.get(2)?,
        last_gameweek_updated: Gameweek::new(row.get(3)?),
    })
}

fn select_state(conn: &Connection, user_id: &UserId) -> Result<Option<TransferState>> {
    let state = conn
        .query_row(
            "SELECT user_id, available_transfers, max_saved_transfers, last_gameweek_updated
             FROM transfer_state WHERE user_id = ?",
            params![user_id.as_str()],
            row_to_state,
        )
        .optional()?;
    Ok(state)
}

impl FantasyDatabase {
    pub fn get_transfer_state(&self, user_id: &UserId) -> Result<Option<TransferState>> {
        select_state(&self.conn, user_id)
    }

    /// Insert or overwrite a user's transfer state
    pub fn set_transfer_state(&mut self, state: &TransferState) -> Result<()> {
        self.conn.execute(
            "INSERT INTO transfer_state
             (user_id, available_transfers, max_saved_transfers, last_gameweek_updated)
             VALUES (?, ?, ?, ?)
             ON CONFLICT (user_id) DO UPDATE SET
                 available_transfers = excluded.available_transfers,
                 max_saved_transfers = excluded.max_saved_transfers,
                 last_gameweek_updated = excluded.last_gameweek_updated",
            params![
                state.user_id.as_str(),
                state.available_transfers,
                state.max_saved_transfers,
                state.last_gameweek_updated.as_u16()
            ],
        )?;
        Ok(())
    }

    /// Grant the weekly transfer to every user not yet updated for `gameweek`.
    ///
    /// A single conditional UPDATE, so running it twice for the same
    /// gameweek only increments once. Returns the number of users updated.
    pub fn rollover_all(&mut self, gameweek: Gameweek) -> Result<usize> {
        let updated = self.conn.execute(
            "UPDATE transfer_state
             SET available_transfers = MIN(available_transfers + 1, max_saved_transfers),
                 last_gameweek_updated = ?1
             WHERE last_gameweek_updated < ?1",
            params![gameweek.as_u16()],
        )?;
        Ok(updated)
    }

    /// Start a transfer. The write lock is taken immediately, so a second
    /// transfer against the same file waits for this one to finish.
    pub fn begin_transfer(&mut self) -> Result<TransferSession<'_>> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        Ok(TransferSession { tx })
    }
}

/// All reads and writes of one transfer. Dropping the session without
/// calling [`TransferSession::commit`] rolls everything back.
pub struct TransferSession<'a> {
    tx: Transaction<'a>,
}

impl TransferSession<'_> {
    /// Create the user's transfer state if it does not exist yet
    pub fn ensure_state(&self, user_id: &UserId, gameweek: Gameweek) -> Result<()> {
        let inserted = self.tx.execute(
            "INSERT OR IGNORE INTO transfer_state
             (user_id, available_transfers, max_saved_transfers, last_gameweek_updated)
             VALUES (?, ?, ?, ?)",
            params![
                user_id.as_str(),
                INITIAL_TRANSFERS,
                DEFAULT_MAX_SAVED_TRANSFERS,
                gameweek.as_u16()
            ],
        )?;
        if inserted > 0 {
            debug!("Created transfer state for {}", user_id);
        }
        Ok(())
    }

    /// Rollover for a single user lagging behind `gameweek`
    pub fn rollover_user(&self, user_id: &UserId, gameweek: Gameweek) -> Result<bool> {
        let updated = self.tx.execute(
            "UPDATE transfer_state
             SET available_transfers = MIN(available_transfers + 1, max_saved_transfers),
                 last_gameweek_updated = ?1
             WHERE user_id = ?2 AND last_gameweek_updated < ?1",
            params![gameweek.as_u16(), user_id.as_str()],
        )?;
        Ok(updated > 0)
    }

    pub fn state(&self, user_id: &UserId) -> Result<Option<TransferState>> {
        select_state(&self.tx, user_id)
    }

    pub fn squad_in_effect(&self, user_id: &UserId, gameweek: Gameweek) -> Result<Option<Squad>> {
        select_squad_in_effect(&self.tx, user_id, gameweek)
    }

    pub fn catalog_player(&self, gameweek: Gameweek, key: &PlayerKey) -> Result<Option<Player>> {
        select_catalog_player(&self.tx, gameweek, key)
    }

    /// Spend one transfer. The balance check and decrement happen in the
    /// same statement.
    pub fn consume_transfer(&self, user_id: &UserId) -> Result<()> {
        let updated = self.tx.execute(
            "UPDATE transfer_state
             SET available_transfers = available_transfers - 1
             WHERE user_id = ? AND available_transfers >= 1",
            params![user_id.as_str()],
        )?;
        if updated != 1 {
            return Err(TransferViolation::NoTransfersAvailable.into());
        }
        Ok(())
    }

    pub fn save_squad(&self, squad: &Squad) -> Result<()> {
        write_squad_snapshot(&self.tx, squad)
    }

    pub fn commit(self) -> Result<()> {
        self.tx.commit()?;
        Ok(())
    }
}
