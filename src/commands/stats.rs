//! Gameweek statistics fetch.

use reqwest::Client;
use tracing::{info, warn};

use crate::{
    cli::types::Gameweek,
    core::FetchSettings,
    error::Result,
    sofascore::{fetch_all, merge_records, page_urls, StatRecord},
    storage::{FantasyDatabase, GameweekStats},
};

/// Counts reported by a statistics fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchSummary {
    pub pages: usize,
    pub records: usize,
    pub players: usize,
}

/// Merge fetched records and replace the stored statistics of `gameweek`.
pub fn store_records(
    db: &mut FantasyDatabase,
    gameweek: Gameweek,
    records: Vec<StatRecord>,
) -> Result<usize> {
    let stats: Vec<GameweekStats> = merge_records(records)
        .into_iter()
        .map(GameweekStats::from)
        .collect();
    db.replace_gameweek_stats(gameweek, &stats)
}

/// Fetch every configured page, merge per player and store the result.
/// When every page fails the stored statistics are left as they were.
pub async fn fetch_stats(
    db: &mut FantasyDatabase,
    client: &Client,
    gameweek: Gameweek,
    settings: &FetchSettings,
) -> Result<FetchSummary> {
    let urls: Vec<String> = settings
        .base_urls
        .iter()
        .flat_map(|base| page_urls(base, settings.page_size, settings.max_offset))
        .collect();

    let records = fetch_all(client, &urls, settings.delay).await;
    let fetched = records.len();
    if records.is_empty() {
        warn!("No statistics fetched; keeping stored GW{} statistics", gameweek);
        return Ok(FetchSummary {
            pages: urls.len(),
            records: 0,
            players: 0,
        });
    }
    let players = store_records(db, gameweek, records)?;
    info!(
        "Stored statistics for {} players in GW{} ({} records)",
        players, gameweek, fetched
    );

    Ok(FetchSummary {
        pages: urls.len(),
        records: fetched,
        players,
    })
}

/// Handle the fetch-stats command
pub async fn handle_fetch_stats(
    db: &mut FantasyDatabase,
    gameweek: Gameweek,
    settings: &FetchSettings,
) -> Result<()> {
    let client = Client::builder().timeout(std::time::Duration::from_secs(30)).build()?;
    let summary = fetch_stats(db, &client, gameweek, settings).await?;
    println!(
        "Fetched {} records from {} pages; stored {} players for GW{}",
        summary.records, summary.pages, summary.players, gameweek
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sofascore::NamedRef;
    use std::time::Duration;

    fn record(name: &str, team: Option<&str>) -> StatRecord {
        StatRecord {
            player: NamedRef {
                name: name.to_string(),
            },
            team: team.map(|t| NamedRef {
                name: t.to_string(),
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_store_records_merges_per_player() {
        let mut db = FantasyDatabase::new_in_memory().unwrap();
        let gw = Gameweek::new(3);
        let records = vec![
            StatRecord {
                goals: Some(2),
                ..record("Anas Samoudi", Some("Raja CA"))
            },
            StatRecord {
                own_goals: Some(1),
                ..record("Anas Samoudi", None)
            },
            record("Jad Assouab", Some("Wydad AC")),
        ];

        assert_eq!(store_records(&mut db, gw, records).unwrap(), 2);
        let stored = db.gameweek_stats(gw).unwrap();
        let samoudi = stored.iter().find(|s| s.player_name == "Anas Samoudi").unwrap();
        assert_eq!(samoudi.team_name, "Raja CA");
        assert_eq!(samoudi.goals, Some(2));
        assert_eq!(samoudi.own_goals, Some(1));
    }

    #[tokio::test]
    async fn test_unreachable_provider_keeps_stored_stats() {
        let mut db = FantasyDatabase::new_in_memory().unwrap();
        let gw = Gameweek::new(3);
        store_records(&mut db, gw, vec![record("Old", Some("Team"))]).unwrap();

        let settings = FetchSettings {
            base_urls: vec!["http://127.0.0.1:9/stats?limit=20".to_string()],
            page_size: 20,
            max_offset: 20,
            delay: Duration::ZERO,
        };
        let summary = fetch_stats(&mut db, &Client::new(), gw, &settings)
            .await
            .unwrap();

        assert_eq!(summary.pages, 2);
        assert_eq!(summary.records, 0);
        assert_eq!(summary.players, 0);
        assert_eq!(db.gameweek_stats(gw).unwrap().len(), 1);
    }
}
