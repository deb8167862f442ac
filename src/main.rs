//! Entry point: parse CLI and dispatch to command handlers.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use fantasy_botola::{
    cli::{Commands, FantasyCli},
    commands::{
        lineup::handle_lineup, pricing::handle_price, rollover::handle_rollover,
        scoring::{handle_score, handle_scores},
        squad::handle_squad,
        stats::handle_fetch_stats,
        transfer::handle_transfer,
    },
    core::{resolve_database_path, resolve_gameweek, FetchSettings, InputSource},
    engine::LevenshteinMatcher,
    storage::FantasyDatabase,
};
use tracing_subscriber::EnvFilter;

/// Run the CLI.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let app = FantasyCli::parse();

    let db_path = resolve_database_path(app.db)?;
    let mut db = FantasyDatabase::open(&db_path)
        .with_context(|| format!("Failed to open database at {}", db_path.display()))?;

    match app.command {
        Commands::Price {
            gameweek,
            csv,
            top,
            json,
        } => {
            let gameweek = resolve_gameweek(gameweek.gameweek)?;
            handle_price(&mut db, gameweek, &csv, top, json)
                .with_context(|| format!("Pricing {} failed", csv.display()))?
        }

        Commands::Squad {
            gameweek,
            request,
            json,
        } => {
            let gameweek = resolve_gameweek(gameweek.gameweek)?;
            handle_squad(&mut db, gameweek, &InputSource::from(request.as_path()), json)
                .context("Squad creation failed")?
        }

        Commands::Lineup {
            gameweek,
            request,
            json,
        } => {
            let gameweek = resolve_gameweek(gameweek.gameweek)?;
            handle_lineup(&mut db, gameweek, &InputSource::from(request.as_path()), json)
                .context("Starting eleven selection failed")?
        }

        Commands::Transfer {
            gameweek,
            request,
            json,
        } => {
            let gameweek = resolve_gameweek(gameweek.gameweek)?;
            handle_transfer(&mut db, gameweek, &InputSource::from(request.as_path()), json)
                .context("Failed to make transfer")?
        }

        Commands::Rollover { gameweek } => {
            let gameweek = resolve_gameweek(gameweek.gameweek)?;
            handle_rollover(&mut db, gameweek).context("Transfer rollover failed")?
        }

        Commands::FetchStats {
            gameweek,
            base_urls,
            max_offset,
            delay_ms,
        } => {
            let gameweek = resolve_gameweek(gameweek.gameweek)?;
            let mut settings = FetchSettings::default();
            if !base_urls.is_empty() {
                settings.base_urls = base_urls;
            }
            if let Some(max_offset) = max_offset {
                settings.max_offset = max_offset;
            }
            if let Some(delay_ms) = delay_ms {
                settings.delay = Duration::from_millis(delay_ms);
            }
            handle_fetch_stats(&mut db, gameweek, &settings)
                .await
                .context("Statistics fetch failed")?
        }

        Commands::Score { gameweek, rules } => {
            let gameweek = resolve_gameweek(gameweek.gameweek)?;
            let rules = rules.as_deref().map(InputSource::from);
            handle_score(&db, gameweek, rules.as_ref(), LevenshteinMatcher)
                .context("Scoring run failed")?
        }

        Commands::Scores {
            gameweek,
            user,
            player,
            json,
        } => {
            let gameweek = resolve_gameweek(gameweek.gameweek)?;
            handle_scores(&db, gameweek, &user, player.as_deref(), json)?
        }
    }

    Ok(())
}
