//! Fantasy Botola Library
//!
//! A fantasy-football engine organised in weekly gameweeks: users build a
//! 15-player squad under budget, position and club constraints, pick a
//! starting eleven each week, make limited transfers between gameweeks and
//! are scored from real match statistics.
//!
//! ## Features
//!
//! - **Pricing**: market values turned into fantasy prices by percentile and position
//! - **Squad and Lineup Rules**: one validator shared by squad creation and transfers
//! - **Transfers**: a rolling, capped budget spent atomically in SQLite
//! - **Scoring**: fuzzy name matching against provider statistics, rule-based points
//! - **Statistics Fetch**: paced, paginated download merged per player
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fantasy_botola::{commands::build_squad, storage::FantasyDatabase, Gameweek, UserId};
//!
//! # fn example(selections: Vec<fantasy_botola::PlayerKey>) -> fantasy_botola::Result<()> {
//! let mut db = FantasyDatabase::new()?;
//! let squad = build_squad(&mut db, Gameweek::new(1), &UserId::new("alice"), &selections)?;
//! println!("{} players, {}M", squad.players.len(), squad.total_price);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export FANTASY_GAMEWEEK=12
//! export FANTASY_DB_PATH=/var/lib/fantasy/fantasy.db
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod engine;
pub mod error;
pub mod sofascore;
pub mod storage;

// Re-export commonly used types
pub use cli::types::{Gameweek, PlayerKey, Position, UserId};
pub use error::{ErrorKind, FantasyError, Result};
