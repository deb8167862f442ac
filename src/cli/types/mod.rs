//! Type-safe wrappers and enums for fantasy gameweek data.

pub mod ids;
pub mod position;
pub mod time;

pub use ids::{PlayerKey, UserId};
pub use position::Position;
pub use time::Gameweek;
