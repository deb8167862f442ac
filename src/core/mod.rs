//! Core utilities shared across commands
//!
//! - `config`: gameweek, database path and fetch settings
//! - `files`: request and rules file input

pub mod config;
pub mod files;

pub use config::{resolve_database_path, resolve_gameweek, FetchSettings};
pub use files::{read_input, read_json, InputSource};
