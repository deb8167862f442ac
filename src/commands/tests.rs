//! Shared fixtures and end-to-end flows for command tests

use crate::cli::types::{Gameweek, PlayerKey, Position, UserId};
use crate::engine::test_support::{player, valid_squad};
use crate::storage::FantasyDatabase;

pub const GW: Gameweek = Gameweek(5);

/// In-memory database whose GW catalog holds the valid squad plus a few
/// extra players for transfer scenarios.
pub fn seeded_db() -> FantasyDatabase {
    let mut db = FantasyDatabase::new_in_memory().unwrap();
    let mut catalog = valid_squad();
    catalog.extend([
        player("Back Six", "Club F", Position::DEF, 5.0),
        player("Back Seven", "Club A", Position::DEF, 4.5),
        player("Pricey Back", "Club F", Position::DEF, 12.0),
        player("Mid Six", "Club F", Position::MID, 6.0),
        player("Keeper Three", "Club F", Position::GK, 4.0),
    ]);
    db.replace_catalog(GW, &catalog).unwrap();
    db
}

pub fn squad_keys() -> Vec<PlayerKey> {
    valid_squad().iter().map(|p| p.key()).collect()
}

mod flow_tests {
    use super::*;
    use crate::commands::{
        apply_transfer, build_lineup, build_squad, requests::ValidTransfer, rollover,
    };

    #[test]
    fn test_squad_transfer_lineup_flow() {
        let mut db = seeded_db();
        let user = UserId::new("flow-user");

        build_squad(&mut db, GW, &user, &squad_keys()).unwrap();
        apply_transfer(
            &mut db,
            GW,
            &ValidTransfer {
                user_id: user.clone(),
                player_out: PlayerKey::new("Back Five", "Club E"),
                player_in: PlayerKey::new("Back Six", "Club F"),
            },
        )
        .unwrap();

        // Next week's rollover restores the spent transfer
        assert_eq!(rollover(&mut db, GW.next()).unwrap(), 1);
        let state = db.get_transfer_state(&user).unwrap().unwrap();
        assert_eq!(state.available_transfers, 1);

        // The lineup for next week is picked from the transferred squad
        let names: Vec<String> = [
            "Keeper One",
            "Back One",
            "Back Two",
            "Back Six",
            "Mid One",
            "Mid Two",
            "Mid Three",
            "Mid Four",
            "Mid Five",
            "Forward One",
            "Forward Two",
        ]
        .iter()
        .map(|n| n.to_string())
        .collect();
        let eleven = build_lineup(&mut db, GW.next(), &user, &names).unwrap();
        assert!(eleven.players.iter().any(|p| p.name == "Back Six"));

        // ...while this week's squad still has the old defender
        let mut this_week = names.clone();
        this_week[3] = "Back Five".to_string();
        assert!(build_lineup(&mut db, GW, &user, &this_week).is_ok());
    }
}
