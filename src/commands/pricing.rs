//! Market-value ingestion and the pricing job.

use std::{fs::File, io::Read, path::Path};

use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    cli::types::{Gameweek, Position},
    engine::{parse_market_value, price_players},
    error::Result,
    storage::{FantasyDatabase, Player, RawPlayer},
};

/// One line of the market-value export
#[derive(Debug, Deserialize)]
struct MarketValueRow {
    #[serde(rename = "Player Name")]
    name: String,
    #[serde(rename = "Market Value")]
    market_value: String,
    #[serde(rename = "Club")]
    club: String,
    #[serde(rename = "Position")]
    position: String,
}

/// Read raw players from a market-value CSV.
///
/// Headers and values are trimmed. Rows that cannot be decoded or carry an
/// unknown position are logged and skipped.
pub fn read_player_values<R: Read>(reader: R) -> Result<Vec<RawPlayer>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut players = Vec::new();
    for (line, row) in rdr.deserialize::<MarketValueRow>().enumerate() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Error processing row {}: {}", line + 1, e);
                continue;
            }
        };
        let position = match row.position.parse::<Position>() {
            Ok(p) => p,
            Err(e) => {
                warn!("Skipping {} ({}): {}", row.name, row.club, e);
                continue;
            }
        };
        players.push(RawPlayer {
            market_value: parse_market_value(&row.market_value),
            name: row.name,
            club: row.club,
            position,
        });
    }
    Ok(players)
}

/// Price a CSV export and replace the catalog of `gameweek` with the result.
pub fn price_catalog(
    db: &mut FantasyDatabase,
    gameweek: Gameweek,
    csv_path: &Path,
) -> Result<Vec<Player>> {
    let raw = read_player_values(File::open(csv_path)?)?;
    let priced = price_players(raw)?;
    let stored = db.replace_catalog(gameweek, &priced)?;
    info!("Catalog for GW{} replaced with {} players", gameweek, stored);
    Ok(priced)
}

/// Handle the price command
pub fn handle_price(
    db: &mut FantasyDatabase,
    gameweek: Gameweek,
    csv_path: &Path,
    top: usize,
    as_json: bool,
) -> Result<()> {
    let priced = price_catalog(db, gameweek, csv_path)?;
    let shown = &priced[..top.min(priced.len())];

    if as_json {
        println!("{}", serde_json::to_string_pretty(shown)?);
        return Ok(());
    }

    println!("Priced {} players for GW{}", priced.len(), gameweek);
    for p in shown {
        println!(
            "{:<30} {:<30} {:<4} {:>8.2}M {:>5.1}",
            p.name, p.club, p.position, p.market_value, p.fantasy_price
        );
    }
    Ok(())
}
