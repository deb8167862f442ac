//! Integration tests for the storage layer

use fantasy_botola::{storage::*, Gameweek, PlayerKey, Position, UserId};

fn create_test_db() -> FantasyDatabase {
    FantasyDatabase::new_in_memory().unwrap()
}

fn player(name: &str, club: &str, position: Position, price: f64) -> Player {
    Player {
        name: name.to_string(),
        club: club.to_string(),
        position,
        market_value: price / 4.0,
        fantasy_price: price,
    }
}

#[test]
fn test_database_creation() {
    let _db = create_test_db();
}

#[test]
fn test_open_creates_parent_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("fantasy.db");

    {
        let mut db = FantasyDatabase::open(&path).unwrap();
        db.replace_catalog(
            Gameweek::new(1),
            &[player("Anas Samoudi", "Raja CA", Position::FWD, 9.0)],
        )
        .unwrap();
    }
    assert!(path.exists());

    // Reopening keeps the data and tolerates the existing schema
    let db = FantasyDatabase::open(&path).unwrap();
    let found = db
        .find_catalog_player(Gameweek::new(1), &PlayerKey::new("Anas Samoudi", "Raja CA"))
        .unwrap();
    assert_eq!(found.unwrap().fantasy_price, 9.0);
}

#[test]
fn test_catalog_is_per_gameweek() {
    let mut db = create_test_db();
    let a = player("A", "Club", Position::MID, 5.0);
    let b = player("B", "Club", Position::DEF, 4.5);

    db.replace_catalog(Gameweek::new(1), &[a.clone()]).unwrap();
    db.replace_catalog(Gameweek::new(2), &[a.clone(), b.clone()]).unwrap();

    assert_eq!(db.get_catalog(Gameweek::new(1)).unwrap(), vec![a.clone()]);
    assert_eq!(db.get_catalog(Gameweek::new(2)).unwrap(), vec![a, b]);
}

#[test]
fn test_same_name_different_club() {
    let mut db = create_test_db();
    let gw = Gameweek::new(1);
    db.replace_catalog(
        gw,
        &[
            player("Ayoub Lakhal", "Olympic Safi", Position::FWD, 6.0),
            player("Ayoub Lakhal", "Moghreb Tetouan", Position::MID, 5.0),
        ],
    )
    .unwrap();

    let safi = db
        .find_catalog_player(gw, &PlayerKey::new("Ayoub Lakhal", "Olympic Safi"))
        .unwrap()
        .unwrap();
    assert_eq!(safi.position, Position::FWD);
    let mat = db
        .find_catalog_player(gw, &PlayerKey::new("Ayoub Lakhal", "Moghreb Tetouan"))
        .unwrap()
        .unwrap();
    assert_eq!(mat.position, Position::MID);
}

#[test]
fn test_transfer_state_defaults_through_session() {
    let mut db = create_test_db();
    let user = UserId::new("fresh");

    let session = db.begin_transfer().unwrap();
    session.ensure_state(&user, Gameweek::new(8)).unwrap();
    let state = session.state(&user).unwrap().unwrap();
    session.commit().unwrap();

    assert_eq!(state.available_transfers, 1);
    assert_eq!(state.max_saved_transfers, 2);
    assert_eq!(state.last_gameweek_updated, Gameweek::new(8));
}

#[test]
fn test_undecodable_squad_is_storage_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fantasy.db");
    let mut db = FantasyDatabase::open(&path).unwrap();
    db.replace_catalog(Gameweek::new(1), &[player("A", "B", Position::GK, 4.0)])
        .unwrap();
    drop(db);

    let raw = rusqlite::Connection::open(&path).unwrap();
    raw.execute(
        "INSERT INTO squads (user_id, gameweek, total_price, players, created_at)
         VALUES ('u', 1, 0.0, 'not json', 0)",
        [],
    )
    .unwrap();
    drop(raw);

    let db = FantasyDatabase::open(&path).unwrap();
    let result = db.get_squad(&UserId::new("u"), Gameweek::new(1));
    assert!(matches!(
        result,
        Err(fantasy_botola::FantasyError::Database(_))
    ));
}
