//! Squad creation from a user's 15 catalog selections.

use std::collections::HashSet;

use tracing::info;

use crate::{
    cli::types::{Gameweek, PlayerKey, UserId},
    core::{read_json, InputSource},
    engine::validator::{squad_total_price, validate_squad, SQUAD_SIZE},
    error::{FantasyError, Result},
    storage::{queries::now_secs, FantasyDatabase, Squad},
};

use super::requests::SquadRequest;

/// Resolve, validate and persist a new squad for `(user_id, gameweek)`.
pub fn build_squad(
    db: &mut FantasyDatabase,
    gameweek: Gameweek,
    user_id: &UserId,
    selections: &[PlayerKey],
) -> Result<Squad> {
    if selections.len() != SQUAD_SIZE {
        return Err(FantasyError::WrongSelectionCount {
            expected: SQUAD_SIZE,
            found: selections.len(),
        });
    }

    let mut seen = HashSet::new();
    let mut players = Vec::with_capacity(SQUAD_SIZE);
    let mut missing = Vec::new();
    for key in selections {
        if !seen.insert(key) {
            missing.push(format!("{key} (selected twice)"));
            continue;
        }
        match db.find_catalog_player(gameweek, key)? {
            Some(player) => players.push(player),
            None => missing.push(key.to_string()),
        }
    }
    if players.len() < SQUAD_SIZE {
        return Err(FantasyError::PlayersNotFound { missing });
    }

    validate_squad(&players)?;

    if db.get_squad(user_id, gameweek)?.is_some() {
        return Err(FantasyError::AlreadyExists {
            entity: "Squad",
            user_id: user_id.clone(),
            gameweek,
        });
    }

    let squad = Squad {
        user_id: user_id.clone(),
        gameweek,
        total_price: squad_total_price(&players),
        players,
        created_at: now_secs(),
    };
    db.insert_squad(&squad)?;

    info!(
        "Squad created for user {} in GW{} ({}M)",
        user_id, gameweek, squad.total_price
    );
    Ok(squad)
}

/// Handle the squad command
pub fn handle_squad(
    db: &mut FantasyDatabase,
    gameweek: Gameweek,
    source: &InputSource,
    as_json: bool,
) -> Result<()> {
    let request: SquadRequest = read_json(source)?;
    let (user_id, selections) = request.validate()?;
    let squad = build_squad(db, gameweek, &user_id, &selections)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&squad)?);
    } else {
        println!(
            "Squad created for {} in GW{}: {} players, {:.1}M",
            squad.user_id,
            squad.gameweek,
            squad.players.len(),
            squad.total_price
        );
        for p in &squad.players {
            println!("  {:<4} {:<30} {:<30} {:>5.1}", p.position, p.name, p.club, p.fantasy_price);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{seeded_db, squad_keys, GW};
    use crate::error::SquadViolation;

    #[test]
    fn test_build_squad_valid() {
        let mut db = seeded_db();
        let user = UserId::new("user-1");

        let squad = build_squad(&mut db, GW, &user, &squad_keys()).unwrap();
        assert_eq!(squad.players.len(), 15);
        assert_eq!(squad.total_price, 99.5);
        assert!(validate_squad(&squad.players).is_ok());

        let stored = db.get_squad(&user, GW).unwrap().unwrap();
        assert_eq!(stored, squad);
    }

    #[test]
    fn test_wrong_selection_count() {
        let mut db = seeded_db();
        let mut keys = squad_keys();
        keys.push(PlayerKey::new("Back Six", "Club F"));

        let err = build_squad(&mut db, GW, &UserId::new("u"), &keys).unwrap_err();
        assert!(matches!(
            err,
            FantasyError::WrongSelectionCount {
                expected: 15,
                found: 16
            }
        ));
        assert_eq!(err.status_code(), 400);
    }

    #[test]
    fn test_unknown_player_listed() {
        let mut db = seeded_db();
        let mut keys = squad_keys();
        keys[3] = PlayerKey::new("Back Two", "Club Z");

        match build_squad(&mut db, GW, &UserId::new("u"), &keys).unwrap_err() {
            FantasyError::PlayersNotFound { missing } => {
                assert_eq!(missing, vec!["Back Two (Club Z)".to_string()])
            }
            other => panic!("Expected PlayersNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_duplicate_selection_fails_lookup() {
        let mut db = seeded_db();
        let mut keys = squad_keys();
        keys[1] = keys[0].clone();

        let err = build_squad(&mut db, GW, &UserId::new("u"), &keys).unwrap_err();
        assert!(matches!(err, FantasyError::PlayersNotFound { .. }));
    }

    #[test]
    fn test_invalid_squad_rejected() {
        let mut db = seeded_db();
        let mut keys = squad_keys();
        // A fourth Club A player in place of a Club B defender
        keys[3] = PlayerKey::new("Back Seven", "Club A");

        let err = build_squad(&mut db, GW, &UserId::new("u"), &keys).unwrap_err();
        assert!(matches!(
            err,
            FantasyError::Squad(SquadViolation::ClubLimit { ref club, count: 4 }) if club == "Club A"
        ));
        assert!(db.get_squad(&UserId::new("u"), GW).unwrap().is_none());
    }

    #[test]
    fn test_second_squad_same_gameweek() {
        let mut db = seeded_db();
        let user = UserId::new("u");
        build_squad(&mut db, GW, &user, &squad_keys()).unwrap();

        let err = build_squad(&mut db, GW, &user, &squad_keys()).unwrap_err();
        assert!(matches!(err, FantasyError::AlreadyExists { entity: "Squad", .. }));
    }
}
