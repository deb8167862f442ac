//! Storage layer for the fantasy gameweek engine
//!
//! Everything lives in one SQLite file:
//! - `models`: typed rows
//! - `schema`: connection and schema management
//! - `queries`: catalog, squad, lineup and statistics access
//! - `transfers`: transfer budgets and the transactional transfer session

pub mod models;
pub mod queries;
pub mod schema;
pub mod transfers;


pub use models::*;
pub use schema::FantasyDatabase;
pub use transfers::TransferSession;
