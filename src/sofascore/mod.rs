//! Client for the third-party match statistics provider
//!
//! Statistics come in pages of 20 players, one endpoint per group of fields.
//! Pages are fetched sequentially with a pause between requests and the
//! partial records are merged into one record per player.

pub mod http;
pub mod merge;
pub mod types;

pub use http::{fetch_all, fetch_page, page_urls};
pub use merge::merge_records;
pub use types::{NamedRef, StatRecord, StatsPage};
