//! Pure game rules: pricing, squad and lineup legality, name matching and
//! point computation. Nothing here touches storage or the network.

pub mod lineup;
pub mod matcher;
pub mod pricing;
pub mod scoring;
pub mod validator;

pub use lineup::validate_formation;
pub use matcher::{LevenshteinMatcher, NameIndex, NameMatch, NameMatcher};
pub use pricing::{parse_market_value, price_players};
pub use scoring::{score_lineup, score_player, ScoringRules};
pub use validator::validate_squad;

#[cfg(test)]
pub(crate) mod test_support {
    use crate::cli::types::Position;
    use crate::storage::Player;

    pub fn player(name: &str, club: &str, position: Position, fantasy_price: f64) -> Player {
        Player {
            name: name.to_string(),
            club: club.to_string(),
            position,
            market_value: fantasy_price / 5.0,
            fantasy_price,
        }
    }

    /// Legal 2/5/5/3 squad, five clubs of three, costing 99.5.
    pub fn valid_squad() -> Vec<Player> {
        vec![
            player("Keeper One", "Club A", Position::GK, 5.0),
            player("Keeper Two", "Club B", Position::GK, 4.5),
            player("Back One", "Club A", Position::DEF, 6.0),
            player("Back Two", "Club B", Position::DEF, 6.0),
            player("Back Three", "Club C", Position::DEF, 5.5),
            player("Back Four", "Club D", Position::DEF, 5.0),
            player("Back Five", "Club E", Position::DEF, 4.5),
            player("Mid One", "Club A", Position::MID, 10.0),
            player("Mid Two", "Club B", Position::MID, 8.0),
            player("Mid Three", "Club C", Position::MID, 7.0),
            player("Mid Four", "Club D", Position::MID, 6.5),
            player("Mid Five", "Club E", Position::MID, 6.0),
            player("Forward One", "Club C", Position::FWD, 12.0),
            player("Forward Two", "Club D", Position::FWD, 8.0),
            player("Forward Three", "Club E", Position::FWD, 5.5),
        ]
    }
}
