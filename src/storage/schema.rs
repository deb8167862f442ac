//! Database schema and connection management

use crate::error::{FantasyError, Result};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a writer waits for another connection's write lock before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database handle for catalogs, squads, lineups, transfer state and stats.
///
/// One handle is opened per command and passed explicitly to every
/// operation; dropping it closes the connection.
pub struct FantasyDatabase {
    pub(crate) conn: Connection,
}

impl FantasyDatabase {
    /// Open the database at the default location and ensure tables exist
    pub fn new() -> Result<Self> {
        Self::open(&Self::default_path()?)
    }

    /// Open (or create) a database file at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Private in-memory database, used by tests and dry runs
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// `<data dir>/fantasy-botola/fantasy.db`
    pub fn default_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            FantasyError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "Could not determine data directory",
            ))
        })?;
        Ok(data_dir.join("fantasy-botola").join("fantasy.db"))
    }

    /// Initialize the database schema
    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS players (
                gameweek INTEGER NOT NULL,
                name TEXT NOT NULL,
                club TEXT NOT NULL,
                position TEXT NOT NULL CHECK (position IN ('GK', 'DEF', 'MID', 'FWD')),
                market_value REAL NOT NULL,
                fantasy_price REAL NOT NULL,
                PRIMARY KEY (gameweek, name, club)
            );

            CREATE TABLE IF NOT EXISTS squads (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                gameweek INTEGER NOT NULL,
                total_price REAL NOT NULL,
                players TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                UNIQUE (user_id, gameweek)
            );

            CREATE TABLE IF NOT EXISTS starting_elevens (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                gameweek INTEGER NOT NULL,
                total_price REAL NOT NULL,
                players TEXT NOT NULL,
                player_scores TEXT,
                created_at INTEGER NOT NULL,
                UNIQUE (user_id, gameweek)
            );

            CREATE TABLE IF NOT EXISTS transfer_state (
                user_id TEXT PRIMARY KEY,
                available_transfers INTEGER NOT NULL CHECK (available_transfers >= 0),
                max_saved_transfers INTEGER NOT NULL DEFAULT 2,
                last_gameweek_updated INTEGER NOT NULL,
                CHECK (available_transfers <= max_saved_transfers)
            );

            CREATE TABLE IF NOT EXISTS gameweek_stats (
                gameweek INTEGER NOT NULL,
                player_name TEXT NOT NULL,
                team_name TEXT NOT NULL,
                goals INTEGER,
                assists INTEGER,
                minutes_played INTEGER,
                yellow_cards INTEGER,
                red_cards INTEGER,
                clean_sheet INTEGER,
                penalty_miss INTEGER,
                own_goals INTEGER,
                PRIMARY KEY (gameweek, player_name, team_name)
            );

            CREATE INDEX IF NOT EXISTS idx_squads_user_gameweek
                ON squads(user_id, gameweek);

            CREATE INDEX IF NOT EXISTS idx_elevens_gameweek
                ON starting_elevens(gameweek);

            CREATE INDEX IF NOT EXISTS idx_transfer_state_gameweek
                ON transfer_state(last_gameweek_updated);",
        )?;

        Ok(())
    }
}
