//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{Gameweek, UserId};

/// Gameweek selection shared by every command
#[derive(Debug, Args)]
pub struct GameweekArg {
    /// Gameweek (or set `FANTASY_GAMEWEEK` env var).
    #[clap(long, short)]
    pub gameweek: Option<Gameweek>,
}

#[derive(Debug, Parser)]
#[clap(
    name = "fantasy-botola",
    about = "Fantasy football gameweek engine: squads, lineups, transfers and scoring"
)]
pub struct FantasyCli {
    /// SQLite database file (or set `FANTASY_DB_PATH` env var).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Price a market-value CSV and replace the gameweek catalog
    Price {
        #[clap(flatten)]
        gameweek: GameweekArg,

        /// CSV with `Player Name`, `Market Value`, `Club`, `Position` columns.
        #[clap(long)]
        csv: PathBuf,

        /// Number of priced players to print.
        #[clap(long, default_value_t = 100)]
        top: usize,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Create a squad: `{"userId", "playerNames": [{"name", "club"}]}`
    Squad {
        #[clap(flatten)]
        gameweek: GameweekArg,

        /// Request body file, or `-` for stdin.
        #[clap(long, short)]
        request: PathBuf,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Select a starting eleven: `{"userId", "playerNames": [name]}`
    Lineup {
        #[clap(flatten)]
        gameweek: GameweekArg,

        /// Request body file, or `-` for stdin.
        #[clap(long, short)]
        request: PathBuf,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Make a transfer: `{"userId", "playerOut": {..}, "playerIn": {..}}`
    Transfer {
        #[clap(flatten)]
        gameweek: GameweekArg,

        /// Request body file, or `-` for stdin.
        #[clap(long, short)]
        request: PathBuf,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },

    /// Grant the weekly transfer to every user
    Rollover {
        #[clap(flatten)]
        gameweek: GameweekArg,
    },

    /// Fetch match statistics for the gameweek from the provider
    FetchStats {
        #[clap(flatten)]
        gameweek: GameweekArg,

        /// Base statistics URL (repeatable); defaults to the Botola Pro endpoints.
        #[clap(long = "base-url")]
        base_urls: Vec<String>,

        /// Highest page offset to request.
        #[clap(long)]
        max_offset: Option<u32>,

        /// Pause between requests in milliseconds.
        #[clap(long)]
        delay_ms: Option<u64>,
    },

    /// Score every starting eleven of the gameweek
    Score {
        #[clap(flatten)]
        gameweek: GameweekArg,

        /// JSON file overriding the default scoring rules.
        #[clap(long)]
        rules: Option<PathBuf>,
    },

    /// Show a user's scores for the gameweek
    Scores {
        #[clap(flatten)]
        gameweek: GameweekArg,

        /// User whose starting eleven to read.
        #[clap(long, short)]
        user: UserId,

        /// Only this player's score.
        #[clap(long, short)]
        player: Option<String>,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,
    },
}
