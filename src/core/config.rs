//! Runtime configuration resolved from flags, environment and defaults.

use std::path::PathBuf;
use std::time::Duration;

use crate::{
    cli::types::Gameweek,
    error::{FantasyError, Result},
    storage::FantasyDatabase,
};

/// Current gameweek, used whenever `--gameweek` is not passed.
pub const GAMEWEEK_ENV_VAR: &str = "FANTASY_GAMEWEEK";

/// Database file, used whenever `--db` is not passed.
pub const DB_PATH_ENV_VAR: &str = "FANTASY_DB_PATH";

/// Statistics endpoints of the Botola Pro season, one per field group.
pub const DEFAULT_STATS_URLS: [&str; 2] = [
    "https://www.sofascore.com/api/v1/unique-tournament/937/season/65433/statistics?limit=20&order=-rating&accumulation=total&fields=goals%2CpenaltyWon%2Cassists%2CyellowCards%2CredCards%2CminutesPlayed&filters=position.in.G~D~M~F",
    "https://www.sofascore.com/api/v1/unique-tournament/937/season/65433/statistics?limit=20&order=-rating&accumulation=total&fields=ownGoals&filters=position.in.G~D~M~F",
];

/// Resolve the gameweek from an explicit value or `FANTASY_GAMEWEEK`.
///
/// A set but unparsable environment value is an error rather than a silent
/// fallback.
pub fn resolve_gameweek(gameweek: Option<Gameweek>) -> Result<Gameweek> {
    if let Some(gw) = gameweek {
        return Ok(gw);
    }
    match std::env::var(GAMEWEEK_ENV_VAR) {
        Ok(raw) => raw.parse(),
        Err(_) => Err(FantasyError::MissingGameweek {
            env_var: GAMEWEEK_ENV_VAR.to_string(),
        }),
    }
}

/// Resolve the database file: `--db`, then `FANTASY_DB_PATH`, then the
/// per-user data directory.
pub fn resolve_database_path(path: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = path {
        return Ok(path);
    }
    match std::env::var(DB_PATH_ENV_VAR) {
        Ok(raw) if !raw.trim().is_empty() => Ok(PathBuf::from(raw.trim())),
        _ => FantasyDatabase::default_path(),
    }
}

/// Paging and pacing for the statistics fetch
#[derive(Debug, Clone, PartialEq)]
pub struct FetchSettings {
    pub base_urls: Vec<String>,
    pub page_size: u32,
    pub max_offset: u32,
    pub delay: Duration,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            base_urls: DEFAULT_STATS_URLS.iter().map(|u| u.to_string()).collect(),
            page_size: 20,
            max_offset: 460,
            delay: Duration::from_millis(1000),
        }
    }
}
