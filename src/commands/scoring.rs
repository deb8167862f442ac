//! Scoring run for a gameweek and per-user score queries.

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    cli::types::{Gameweek, UserId},
    core::{read_json, InputSource},
    engine::{score_lineup, NameIndex, NameMatcher, ScoringRules},
    error::{FantasyError, Result},
    storage::{FantasyDatabase, PlayerScore},
};

/// Outcome of a scoring run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScoringReport {
    pub scored: usize,
    pub failed: usize,
}

/// Score every starting eleven of `gameweek` and store the results on each
/// eleven's row.
pub fn score_gameweek<M: NameMatcher>(
    db: &FantasyDatabase,
    gameweek: Gameweek,
    rules: &ScoringRules,
    matcher: M,
) -> Result<ScoringReport> {
    let stats = db.gameweek_stats(gameweek)?;
    if stats.is_empty() {
        warn!("No statistics stored for GW{}; every player scores 0", gameweek);
    }
    let index = NameIndex::new(stats.iter().map(|s| s.player_name.clone()), matcher);

    let elevens = db.starting_elevens_for(gameweek)?;
    info!("Scoring {} teams for GW{}", elevens.len(), gameweek);

    let scored: Vec<(i64, UserId, Vec<PlayerScore>)> = elevens
        .into_iter()
        .map(|eleven| {
            let scores = score_lineup(&eleven.players, &index, &stats, rules);
            (eleven.id, eleven.user_id, scores)
        })
        .collect();

    store_scores(db, &scored)
}

/// Write computed scores back by row id. A row that no longer exists is
/// counted as a failure and the batch continues.
pub fn store_scores(
    db: &FantasyDatabase,
    results: &[(i64, UserId, Vec<PlayerScore>)],
) -> Result<ScoringReport> {
    let mut report = ScoringReport::default();
    for (id, user_id, scores) in results {
        if db.set_player_scores(*id, scores)? == 1 {
            info!(
                "Scores updated for team with userId={} ({} points)",
                user_id,
                scores.iter().map(|s| s.score).sum::<i32>()
            );
            report.scored += 1;
        } else {
            warn!("Failed to update scores for team with userId={}", user_id);
            report.failed += 1;
        }
    }
    Ok(report)
}

/// Scores of one user's eleven, or of a single player in it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum UserScores {
    #[serde(rename_all = "camelCase")]
    Team {
        player_scores: Vec<PlayerScore>,
        total_score: i32,
    },
    Player(PlayerScore),
}

pub fn user_scores(
    db: &FantasyDatabase,
    gameweek: Gameweek,
    user_id: &UserId,
    player: Option<&str>,
) -> Result<UserScores> {
    let eleven = db
        .get_starting_eleven(user_id, gameweek)?
        .ok_or_else(|| FantasyError::LineupNotFound {
            user_id: user_id.clone(),
            gameweek,
        })?;
    let total_score = eleven.total_score();
    let player_scores = eleven.player_scores.unwrap_or_default();

    match player {
        Some(name) => player_scores
            .into_iter()
            .find(|s| s.player_name == name)
            .map(UserScores::Player)
            .ok_or_else(|| FantasyError::ScoreNotFound {
                name: name.to_string(),
            }),
        None => Ok(UserScores::Team {
            player_scores,
            total_score,
        }),
    }
}

/// Handle the score command
pub fn handle_score<M: NameMatcher>(
    db: &FantasyDatabase,
    gameweek: Gameweek,
    rules_file: Option<&InputSource>,
    matcher: M,
) -> Result<()> {
    let rules = match rules_file {
        Some(source) => read_json::<ScoringRules>(source)?,
        None => ScoringRules::default(),
    };
    let report = score_gameweek(db, gameweek, &rules, matcher)?;
    println!(
        "Scored {} teams for GW{} ({} failed)",
        report.scored, gameweek, report.failed
    );
    Ok(())
}

/// Handle the scores query command
pub fn handle_scores(
    db: &FantasyDatabase,
    gameweek: Gameweek,
    user_id: &UserId,
    player: Option<&str>,
    as_json: bool,
) -> Result<()> {
    let scores = user_scores(db, gameweek, user_id, player)?;
    if as_json {
        println!("{}", serde_json::to_string_pretty(&scores)?);
        return Ok(());
    }

    match scores {
        UserScores::Player(s) => println!("{}: {}", s.player_name, s.score),
        UserScores::Team {
            player_scores,
            total_score,
        } => {
            for s in &player_scores {
                println!("  {:<30} {:>4}", s.player_name, s.score);
            }
            println!("Total: {}", total_score);
        }
    }
    Ok(())
}
