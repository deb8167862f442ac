//! Error types for the fantasy gameweek engine

use thiserror::Error;

use crate::cli::types::{Gameweek, Position, UserId};


pub type Result<T> = std::result::Result<T, FantasyError>;

/// Broad class of a failure, used by callers to decide how to surface it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input: wrong counts, missing fields, unparsable values.
    Input,
    /// A squad, lineup or transfer rule was violated.
    Rule,
    /// A referenced user, player, squad or lineup does not exist.
    NotFound,
    /// The third-party statistics provider failed.
    External,
    /// Database, filesystem or serialization failure.
    Storage,
}

/// Reasons a 15-player squad is illegal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SquadViolation {
    #[error("Squad must contain exactly 15 players. Found {found}")]
    WrongPlayerCount { found: usize },

    #[error("Need exactly {expected} {position}. Found {found}")]
    PositionCount {
        position: Position,
        expected: usize,
        found: usize,
    },

    #[error("Cannot have more than 3 players from club {club} (found {count})")]
    ClubLimit { club: String, count: usize },

    #[error("Squad price exceeds 100M. Found {total}M ({overage}M over)")]
    OverBudget { total: f64, overage: f64 },
}

/// Reasons a starting eleven is illegal.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LineupViolation {
    #[error("Invalid selection: {} not in squad", names.join(", "))]
    NotInSquad { names: Vec<String> },

    #[error("Ambiguous selection: {name} plays for {}; use \"{name} (Club)\"", clubs.join(", "))]
    AmbiguousName { name: String, clubs: Vec<String> },

    #[error("Starting eleven must contain exactly 11 players. Found {found}")]
    WrongPlayerCount { found: usize },

    #[error("Must select exactly 1 GK. Found {found}")]
    GoalkeeperCount { found: usize },

    #[error("Minimum {min} {position} required. Found {found}")]
    TooFew {
        position: Position,
        min: usize,
        found: usize,
    },
}

/// Reasons a transfer request is rejected.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransferViolation {
    #[error("No transfers available")]
    NoTransfersAvailable,

    #[error("Position mismatch: {out_position} out, {in_position} in")]
    PositionMismatch {
        out_position: Position,
        in_position: Position,
    },

    #[error("Budget exceeded: squad would cost {total}M")]
    BudgetExceeded { total: f64 },

    #[error("Club limit exceeded for {club}")]
    ClubLimitExceeded { club: String },

    #[error("{name} ({club}) is already in the squad")]
    PlayerAlreadyInSquad { name: String, club: String },
}

#[derive(Error, Debug)]
pub enum FantasyError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV parsing failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Gameweek not provided and {env_var} environment variable not set")]
    MissingGameweek { env_var: String },

    #[error("Failed to parse number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Invalid request body: {0}")]
    InvalidRequest(#[source] serde_json::Error),

    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Must provide exactly {expected} player selections. Found {found}")]
    WrongSelectionCount { expected: usize, found: usize },

    #[error("Pricing needs at least 2 players. Found {found}")]
    InsufficientPlayers { found: usize },

    #[error(transparent)]
    Squad(#[from] SquadViolation),

    #[error(transparent)]
    Lineup(#[from] LineupViolation),

    #[error(transparent)]
    Transfer(#[from] TransferViolation),

    #[error("Players not found: {}", missing.join(", "))]
    PlayersNotFound { missing: Vec<String> },

    #[error("Player not found: {name} ({club})")]
    PlayerNotFound { name: String, club: String },

    #[error("Player not in squad: {name} ({club})")]
    PlayerNotInSquad { name: String, club: String },

    #[error("Squad for GW{gameweek} not found for user {user_id}")]
    SquadNotFound { user_id: UserId, gameweek: Gameweek },

    #[error("Starting eleven for GW{gameweek} not found for user {user_id}")]
    LineupNotFound { user_id: UserId, gameweek: Gameweek },

    #[error("No score recorded for {name}")]
    ScoreNotFound { name: String },

    #[error("{entity} for GW{gameweek} already exists for user {user_id}")]
    AlreadyExists {
        entity: &'static str,
        user_id: UserId,
        gameweek: Gameweek,
    },
}

impl FantasyError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FantasyError::MissingGameweek { .. }
            | FantasyError::InvalidNumber(_)
            | FantasyError::InvalidPosition { .. }
            | FantasyError::MissingField { .. }
            | FantasyError::InvalidRequest(_)
            | FantasyError::WrongSelectionCount { .. }
            | FantasyError::InsufficientPlayers { .. } => ErrorKind::Input,

            FantasyError::Squad(_)
            | FantasyError::Lineup(_)
            | FantasyError::Transfer(_)
            | FantasyError::AlreadyExists { .. } => ErrorKind::Rule,

            FantasyError::PlayersNotFound { .. }
            | FantasyError::PlayerNotFound { .. }
            | FantasyError::PlayerNotInSquad { .. }
            | FantasyError::SquadNotFound { .. }
            | FantasyError::LineupNotFound { .. }
            | FantasyError::ScoreNotFound { .. } => ErrorKind::NotFound,

            FantasyError::Http(_) => ErrorKind::External,

            FantasyError::Database(_)
            | FantasyError::Json(_)
            | FantasyError::Csv(_)
            | FantasyError::Io(_) => ErrorKind::Storage,
        }
    }

    /// HTTP-equivalent status for a routing layer: 400 for malformed input,
    /// 404 for failed lookups, 500 for everything else.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Input => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Rule | ErrorKind::External | ErrorKind::Storage => 500,
        }
    }
}
