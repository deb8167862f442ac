//! Catalog, squad, lineup and statistics queries

use super::{models::*, schema::FantasyDatabase};
use crate::cli::types::{Gameweek, PlayerKey, Position, UserId};
use crate::error::Result;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use serde::de::DeserializeOwned;
use std::time::{SystemTime, UNIX_EPOCH};

/// Seconds since the Unix epoch
pub fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn conversion_error<E>(idx: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(err))
}

/// Decode a JSON text column into a typed value.
fn json_column<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| conversion_error(idx, e))
}

fn position_column(row: &Row, idx: usize) -> rusqlite::Result<Position> {
    let raw: String = row.get(idx)?;
    raw.parse().map_err(|e| conversion_error(idx, e))
}

fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
    Ok(Player {
        name: row.get(0)?,
        club: row.get(1)?,
        position: position_column(row, 2)?,
        market_value: row.get(3)?,
        fantasy_price: row.get(4)?,
    })
}

fn row_to_squad(row: &Row) -> rusqlite::Result<Squad> {
    Ok(Squad {
        user_id: UserId::new(row.get::<_, String>(0)?),
        gameweek: Gameweek::new(row.get(1)?),
        total_price: row.get(2)?,
        players: json_column(row, 3)?,
        created_at: row.get(4)?,
    })
}

fn row_to_starting_eleven(row: &Row) -> rusqlite::Result<StartingEleven> {
    let scores: Option<String> = row.get(5)?;
    let player_scores = scores
        .map(|raw| serde_json::from_str(&raw).map_err(|e| conversion_error(5, e)))
        .transpose()?;

    Ok(StartingEleven {
        id: row.get(0)?,
        user_id: UserId::new(row.get::<_, String>(1)?),
        gameweek: Gameweek::new(row.get(2)?),
        total_price: row.get(3)?,
        players: json_column(row, 4)?,
        player_scores,
        created_at: row.get(6)?,
    })
}

fn row_to_stats(row: &Row) -> rusqlite::Result<GameweekStats> {
    Ok(GameweekStats {
        player_name: row.get(0)?,
        team_name: row.get(1)?,
        goals: row.get(2)?,
        assists: row.get(3)?,
        minutes_played: row.get(4)?,
        yellow_cards: row.get(5)?,
        red_cards: row.get(6)?,
        clean_sheet: row.get(7)?,
        penalty_miss: row.get(8)?,
        own_goals: row.get(9)?,
    })
}

const PLAYER_COLUMNS: &str = "name, club, position, market_value, fantasy_price";
const SQUAD_COLUMNS: &str = "user_id, gameweek, total_price, players, created_at";
const ELEVEN_COLUMNS: &str =
    "id, user_id, gameweek, total_price, players, player_scores, created_at";

/// Exact (name, club) lookup in a gameweek catalog.
pub(crate) fn select_catalog_player(
    conn: &Connection,
    gameweek: Gameweek,
    key: &PlayerKey,
) -> Result<Option<Player>> {
    let player = conn
        .query_row(
            &format!(
                "SELECT {PLAYER_COLUMNS} FROM players
                 WHERE gameweek = ? AND name = ? AND club = ?"
            ),
            params![gameweek.as_u16(), key.name, key.club],
            row_to_player,
        )
        .optional()?;
    Ok(player)
}

/// The user's squad row with the greatest gameweek not after `gameweek`.
pub(crate) fn select_squad_in_effect(
    conn: &Connection,
    user_id: &UserId,
    gameweek: Gameweek,
) -> Result<Option<Squad>> {
    let squad = conn
        .query_row(
            &format!(
                "SELECT {SQUAD_COLUMNS} FROM squads
                 WHERE user_id = ? AND gameweek <= ?
                 ORDER BY gameweek DESC
                 LIMIT 1"
            ),
            params![user_id.as_str(), gameweek.as_u16()],
            row_to_squad,
        )
        .optional()?;
    Ok(squad)
}

/// Insert the squad for its (user, gameweek), replacing a previous snapshot
/// of that same gameweek.
pub(crate) fn write_squad_snapshot(conn: &Connection, squad: &Squad) -> Result<()> {
    conn.execute(
        "INSERT INTO squads (user_id, gameweek, total_price, players, created_at)
         VALUES (?, ?, ?, ?, ?)
         ON CONFLICT (user_id, gameweek) DO UPDATE SET
             total_price = excluded.total_price,
             players = excluded.players,
             created_at = excluded.created_at",
        params![
            squad.user_id.as_str(),
            squad.gameweek.as_u16(),
            squad.total_price,
            serde_json::to_string(&squad.players)?,
            squad.created_at
        ],
    )?;
    Ok(())
}

impl FantasyDatabase {
    /// Replace the whole priced catalog of a gameweek in one transaction
    pub fn replace_catalog(&mut self, gameweek: Gameweek, players: &[Player]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM players WHERE gameweek = ?",
            params![gameweek.as_u16()],
        )?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO players
                 (gameweek, name, club, position, market_value, fantasy_price)
                 VALUES (?, ?, ?, ?, ?, ?)",
            )?;
            for player in players {
                inserted += stmt.execute(params![
                    gameweek.as_u16(),
                    player.name,
                    player.club,
                    player.position.as_str(),
                    player.market_value,
                    player.fantasy_price
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// All catalog players of a gameweek, most expensive first
    pub fn get_catalog(&self, gameweek: Gameweek) -> Result<Vec<Player>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {PLAYER_COLUMNS} FROM players
             WHERE gameweek = ?
             ORDER BY fantasy_price DESC, market_value DESC, name"
        ))?;
        let rows = stmt.query_map(params![gameweek.as_u16()], row_to_player)?;

        let mut players = Vec::new();
        for row in rows {
            players.push(row?);
        }
        Ok(players)
    }

    pub fn find_catalog_player(
        &self,
        gameweek: Gameweek,
        key: &PlayerKey,
    ) -> Result<Option<Player>> {
        select_catalog_player(&self.conn, gameweek, key)
    }

    /// Insert a brand-new squad. Fails on an existing (user, gameweek) row.
    pub fn insert_squad(&mut self, squad: &Squad) -> Result<()> {
        self.conn.execute(
            "INSERT INTO squads (user_id, gameweek, total_price, players, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                squad.user_id.as_str(),
                squad.gameweek.as_u16(),
                squad.total_price,
                serde_json::to_string(&squad.players)?,
                squad.created_at
            ],
        )?;
        Ok(())
    }

    /// The squad stored for exactly this (user, gameweek)
    pub fn get_squad(&self, user_id: &UserId, gameweek: Gameweek) -> Result<Option<Squad>> {
        let squad = self
            .conn
            .query_row(
                &format!(
                    "SELECT {SQUAD_COLUMNS} FROM squads
                     WHERE user_id = ? AND gameweek = ?"
                ),
                params![user_id.as_str(), gameweek.as_u16()],
                row_to_squad,
            )
            .optional()?;
        Ok(squad)
    }

    /// The squad a user fields in `gameweek`: the latest snapshot not after it
    pub fn squad_in_effect(&self, user_id: &UserId, gameweek: Gameweek) -> Result<Option<Squad>> {
        select_squad_in_effect(&self.conn, user_id, gameweek)
    }

    /// Insert a starting eleven and return it with its row id
    pub fn insert_starting_eleven(
        &mut self,
        user_id: &UserId,
        gameweek: Gameweek,
        players: Vec<Player>,
    ) -> Result<StartingEleven> {
        let total_price = players.iter().map(|p| p.fantasy_price).sum();
        let created_at = now_secs();
        self.conn.execute(
            "INSERT INTO starting_elevens (user_id, gameweek, total_price, players, created_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                user_id.as_str(),
                gameweek.as_u16(),
                total_price,
                serde_json::to_string(&players)?,
                created_at
            ],
        )?;

        Ok(StartingEleven {
            id: self.conn.last_insert_rowid(),
            user_id: user_id.clone(),
            gameweek,
            total_price,
            players,
            player_scores: None,
            created_at,
        })
    }

    pub fn get_starting_eleven(
        &self,
        user_id: &UserId,
        gameweek: Gameweek,
    ) -> Result<Option<StartingEleven>> {
        let eleven = self
            .conn
            .query_row(
                &format!(
                    "SELECT {ELEVEN_COLUMNS} FROM starting_elevens
                     WHERE user_id = ? AND gameweek = ?"
                ),
                params![user_id.as_str(), gameweek.as_u16()],
                row_to_starting_eleven,
            )
            .optional()?;
        Ok(eleven)
    }

    /// Every starting eleven of a gameweek, in creation order
    pub fn starting_elevens_for(&self, gameweek: Gameweek) -> Result<Vec<StartingEleven>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ELEVEN_COLUMNS} FROM starting_elevens
             WHERE gameweek = ?
             ORDER BY id"
        ))?;
        let rows = stmt.query_map(params![gameweek.as_u16()], row_to_starting_eleven)?;

        let mut elevens = Vec::new();
        for row in rows {
            elevens.push(row?);
        }
        Ok(elevens)
    }

    /// Overwrite the scores of one starting eleven by row id.
    /// Returns the number of rows touched (0 when the row is gone).
    pub fn set_player_scores(&self, eleven_id: i64, scores: &[PlayerScore]) -> Result<usize> {
        let rows = self.conn.execute(
            "UPDATE starting_elevens SET player_scores = ? WHERE id = ?",
            params![serde_json::to_string(scores)?, eleven_id],
        )?;
        Ok(rows)
    }

    /// Replace all statistics rows of a gameweek in one transaction
    pub fn replace_gameweek_stats(
        &mut self,
        gameweek: Gameweek,
        stats: &[GameweekStats],
    ) -> Result<usize> {
        let tx = self.conn.transaction()?;
        tx.execute(
            "DELETE FROM gameweek_stats WHERE gameweek = ?",
            params![gameweek.as_u16()],
        )?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare(
                "INSERT OR REPLACE INTO gameweek_stats
                 (gameweek, player_name, team_name, goals, assists, minutes_played,
                  yellow_cards, red_cards, clean_sheet, penalty_miss, own_goals)
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )?;
            for s in stats {
                inserted += stmt.execute(params![
                    gameweek.as_u16(),
                    s.player_name,
                    s.team_name,
                    s.goals,
                    s.assists,
                    s.minutes_played,
                    s.yellow_cards,
                    s.red_cards,
                    s.clean_sheet,
                    s.penalty_miss,
                    s.own_goals
                ])?;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    pub fn gameweek_stats(&self, gameweek: Gameweek) -> Result<Vec<GameweekStats>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_name, team_name, goals, assists, minutes_played,
                    yellow_cards, red_cards, clean_sheet, penalty_miss, own_goals
             FROM gameweek_stats
             WHERE gameweek = ?
             ORDER BY player_name, team_name",
        )?;
        let rows = stmt.query_map(params![gameweek.as_u16()], row_to_stats)?;

        let mut stats = Vec::new();
        for row in rows {
            stats.push(row?);
        }
        Ok(stats)
    }
}
