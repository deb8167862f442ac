//! Command implementations for the fantasy gameweek engine
//!
//! Each module holds the domain operation (usable from code and tests) and
//! a `handle_*` function that reads input and prints the result.

pub mod lineup;
pub mod pricing;
pub mod requests;
pub mod rollover;
pub mod scoring;
pub mod squad;
pub mod stats;
pub mod transfer;

#[cfg(test)]
pub(crate) mod tests;

pub use lineup::build_lineup;
pub use pricing::{price_catalog, read_player_values};
pub use rollover::rollover;
pub use scoring::{score_gameweek, user_scores, ScoringReport, UserScores};
pub use squad::build_squad;
pub use stats::fetch_stats;
pub use transfer::apply_transfer;
