//! Starting-eleven selection from the squad in effect.

use tracing::info;

use crate::{
    cli::types::{Gameweek, UserId},
    core::{read_json, InputSource},
    engine::lineup::{validate_formation, LINEUP_SIZE},
    error::{FantasyError, LineupViolation, Result},
    storage::{FantasyDatabase, Player, StartingEleven},
};

use super::requests::LineupRequest;

/// Pick the named players out of the user's squad and persist them as the
/// starting eleven of `gameweek`.
pub fn build_lineup(
    db: &mut FantasyDatabase,
    gameweek: Gameweek,
    user_id: &UserId,
    player_names: &[String],
) -> Result<StartingEleven> {
    let squad = db
        .squad_in_effect(user_id, gameweek)?
        .ok_or_else(|| FantasyError::SquadNotFound {
            user_id: user_id.clone(),
            gameweek,
        })?;

    let mut selected: Vec<Player> = Vec::with_capacity(LINEUP_SIZE);
    let mut not_in_squad: Vec<String> = Vec::new();
    for name in player_names {
        let candidates: Vec<&Player> = squad
            .players
            .iter()
            .filter(|p| selects(p, name))
            .collect();
        match candidates.as_slice() {
            [player] => {
                if !selected.iter().any(|s| s.is(&player.key())) {
                    selected.push((*player).clone());
                }
            }
            [] => {
                if !not_in_squad.contains(name) {
                    not_in_squad.push(name.clone());
                }
            }
            several => {
                return Err(LineupViolation::AmbiguousName {
                    name: name.clone(),
                    clubs: several.iter().map(|p| p.club.clone()).collect(),
                }
                .into());
            }
        }
    }

    if !not_in_squad.is_empty() {
        return Err(LineupViolation::NotInSquad {
            names: not_in_squad,
        }
        .into());
    }

    validate_formation(&selected)?;

    if db.get_starting_eleven(user_id, gameweek)?.is_some() {
        return Err(FantasyError::AlreadyExists {
            entity: "Starting eleven",
            user_id: user_id.clone(),
            gameweek,
        });
    }

    let eleven = db.insert_starting_eleven(user_id, gameweek, selected)?;
    info!(
        "Starting eleven saved for user {} in GW{} (squad from GW{})",
        user_id, gameweek, squad.gameweek
    );
    Ok(eleven)
}

/// A lineup entry is either the bare name or `Name (Club)` when the squad
/// holds two players sharing the name.
fn selects(player: &Player, entry: &str) -> bool {
    player.name == entry || format!("{} ({})", player.name, player.club) == entry
}

/// Handle the lineup command
pub fn handle_lineup(
    db: &mut FantasyDatabase,
    gameweek: Gameweek,
    source: &InputSource,
    as_json: bool,
) -> Result<()> {
    let request: LineupRequest = read_json(source)?;
    let (user_id, names) = request.validate()?;
    let eleven = build_lineup(db, gameweek, &user_id, &names)?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&eleven)?);
    } else {
        println!(
            "Starting eleven saved for {} in GW{} ({:.1}M)",
            eleven.user_id, eleven.gameweek, eleven.total_price
        );
        for p in &eleven.players {
            println!("  {:<4} {} ({})", p.position, p.name, p.club);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{
        squad::build_squad,
        tests::{seeded_db, squad_keys, GW},
    };

    const ELEVEN: [&str; 11] = [
        "Keeper One",
        "Back One",
        "Back Two",
        "Back Three",
        "Back Four",
        "Mid One",
        "Mid Two",
        "Mid Three",
        "Mid Four",
        "Forward One",
        "Forward Two",
    ];

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|n| n.to_string()).collect()
    }

    fn db_with_squad(user: &UserId) -> FantasyDatabase {
        let mut db = seeded_db();
        build_squad(&mut db, GW, user, &squad_keys()).unwrap();
        db
    }

    #[test]
    fn test_build_lineup_valid() {
        let user = UserId::new("u");
        let mut db = db_with_squad(&user);

        let eleven = build_lineup(&mut db, GW, &user, &names(&ELEVEN)).unwrap();
        assert_eq!(eleven.players.len(), 11);
        assert_eq!(eleven.total_price, 79.0);
        assert!(eleven.player_scores.is_none());

        let stored = db.get_starting_eleven(&user, GW).unwrap().unwrap();
        assert_eq!(stored.players, eleven.players);
    }

    #[test]
    fn test_squad_carries_into_later_gameweek() {
        let user = UserId::new("u");
        let mut db = db_with_squad(&user);

        let later = Gameweek::new(GW.as_u16() + 3);
        let eleven = build_lineup(&mut db, later, &user, &names(&ELEVEN)).unwrap();
        assert_eq!(eleven.gameweek, later);
    }

    #[test]
    fn test_no_squad() {
        let mut db = seeded_db();
        let err = build_lineup(&mut db, GW, &UserId::new("ghost"), &names(&ELEVEN)).unwrap_err();
        assert!(matches!(err, FantasyError::SquadNotFound { .. }));
        assert_eq!(err.status_code(), 404);
    }

    #[test]
    fn test_player_outside_squad_is_named() {
        let user = UserId::new("u");
        let mut db = db_with_squad(&user);
        let mut picks = names(&ELEVEN);
        picks[10] = "Back Six".to_string();

        let err = build_lineup(&mut db, GW, &user, &picks).unwrap_err();
        assert_eq!(err.to_string(), "Invalid selection: Back Six not in squad");
        assert!(db.get_starting_eleven(&user, GW).unwrap().is_none());
    }

    #[test]
    fn test_two_goalkeepers_rejected() {
        let user = UserId::new("u");
        let mut db = db_with_squad(&user);
        let mut picks = names(&ELEVEN);
        picks[10] = "Keeper Two".to_string();

        let err = build_lineup(&mut db, GW, &user, &picks).unwrap_err();
        assert!(matches!(
            err,
            FantasyError::Lineup(LineupViolation::GoalkeeperCount { found: 2 })
        ));
    }

    #[test]
    fn test_repeated_name_counts_once() {
        let user = UserId::new("u");
        let mut db = db_with_squad(&user);
        let mut picks = names(&ELEVEN);
        picks[10] = "Forward One".to_string();

        let err = build_lineup(&mut db, GW, &user, &picks).unwrap_err();
        assert!(matches!(
            err,
            FantasyError::Lineup(LineupViolation::WrongPlayerCount { found: 10 })
        ));
    }

    #[test]
    fn test_namesake_needs_club_qualifier() {
        let user = UserId::new("u");
        let mut db = seeded_db();
        let mut catalog = db.get_catalog(GW).unwrap();
        catalog.push(crate::engine::test_support::player(
            "Back Five",
            "Club F",
            crate::cli::types::Position::DEF,
            4.5,
        ));
        db.replace_catalog(GW, &catalog).unwrap();

        let mut keys = squad_keys();
        let back_four = keys.iter().position(|k| k.name == "Back Four").unwrap();
        keys[back_four] = crate::cli::types::PlayerKey::new("Back Five", "Club F");
        build_squad(&mut db, GW, &user, &keys).unwrap();

        let mut picks = names(&ELEVEN);
        picks[4] = "Back Five".to_string();
        let err = build_lineup(&mut db, GW, &user, &picks).unwrap_err();
        match err {
            FantasyError::Lineup(LineupViolation::AmbiguousName { name, mut clubs }) => {
                assert_eq!(name, "Back Five");
                clubs.sort();
                assert_eq!(clubs, vec!["Club E", "Club F"]);
            }
            other => panic!("Expected AmbiguousName, got {other:?}"),
        }
        assert!(db.get_starting_eleven(&user, GW).unwrap().is_none());

        picks[4] = "Back Five (Club F)".to_string();
        let eleven = build_lineup(&mut db, GW, &user, &picks).unwrap();
        assert!(eleven
            .players
            .iter()
            .any(|p| p.name == "Back Five" && p.club == "Club F"));
        assert!(!eleven.players.iter().any(|p| p.club == "Club E"));
    }

    #[test]
    fn test_second_lineup_same_gameweek() {
        let user = UserId::new("u");
        let mut db = db_with_squad(&user);
        build_lineup(&mut db, GW, &user, &names(&ELEVEN)).unwrap();

        let err = build_lineup(&mut db, GW, &user, &names(&ELEVEN)).unwrap_err();
        assert!(matches!(err, FantasyError::AlreadyExists { .. }));
    }
}
