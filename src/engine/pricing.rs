//! Fantasy price derivation from real-world market values.
//!
//! Prices are assigned by rank, not by raw value: the batch is sorted by
//! market value, each player gets a percentile (0 = most valuable), the
//! percentile is mapped through fixed breakpoints to a base price, and the
//! base price is scaled by a position multiplier. Every price is a multiple
//! of 0.5.

use tracing::warn;

use crate::cli::types::Position;
use crate::error::{FantasyError, Result};
use crate::storage::{Player, RawPlayer};

/// Market value assigned to players with an unknown or unparsable value.
pub const UNKNOWN_MARKET_VALUE: f64 = 0.01;

/// Fallback base price for percentiles outside `[0, 1]`.
const FLOOR_PRICE: f64 = 4.0;

/// (percentile, base price) breakpoints, interpolated linearly.
pub const PRICE_BREAKPOINTS: [(f64, f64); 6] = [
    (0.0, 12.5),
    (0.01, 10.0),
    (0.05, 8.0),
    (0.25, 6.0),
    (0.75, 5.0),
    (1.0, 4.0),
];

pub fn round_to_half(value: f64) -> f64 {
    (value * 2.0).round() / 2.0
}

/// Parse a market value string such as `€1.50m`, `€500k` or `-`, in millions.
///
/// Never fails: the `-` sentinel and anything unparsable map to
/// [`UNKNOWN_MARKET_VALUE`], the latter with a warning.
pub fn parse_market_value(raw: &str) -> f64 {
    if raw.trim() == "-" {
        return UNKNOWN_MARKET_VALUE;
    }

    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '€' && *c != ',')
        .collect::<String>()
        .to_lowercase();

    match find_scaled_amount(&cleaned) {
        Some(value) => value,
        None => {
            warn!("Invalid value format: {raw}, defaulting to {UNKNOWN_MARKET_VALUE}M");
            UNKNOWN_MARKET_VALUE
        }
    }
}

/// Find the first `<number><m|k>` run in `s` and return it in millions.
fn find_scaled_amount(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let is_numeric = |b: u8| b.is_ascii_digit() || b == b'.';
    let mut start = 0;

    while start < bytes.len() {
        if !is_numeric(bytes[start]) {
            start += 1;
            continue;
        }
        let mut end = start;
        while end < bytes.len() && is_numeric(bytes[end]) {
            end += 1;
        }
        let suffix = bytes.get(end).copied();
        if matches!(suffix, Some(b'm') | Some(b'k')) {
            if let Some(amount) = parse_leading_float(&s[start..end]) {
                return Some(if suffix == Some(b'k') {
                    amount / 1000.0
                } else {
                    amount
                });
            }
        }
        start = end;
    }
    None
}

/// Parse the longest valid float prefix, so `1.2.3` reads as `1.2`.
fn parse_leading_float(run: &str) -> Option<f64> {
    let mut candidate = run;
    if let Some(first_dot) = run.find('.') {
        if let Some(second_dot) = run[first_dot + 1..].find('.') {
            candidate = &run[..first_dot + 1 + second_dot];
        }
    }
    candidate.parse::<f64>().ok()
}

/// Map a percentile (0 = richest, 1 = poorest) to a base price.
pub fn price_for_percentile(percentile: f64) -> f64 {
    for window in PRICE_BREAKPOINTS.windows(2) {
        let (low_pct, low_price) = window[0];
        let (high_pct, high_price) = window[1];
        if percentile >= low_pct && percentile <= high_pct {
            let fraction = (percentile - low_pct) / (high_pct - low_pct);
            return round_to_half(low_price + fraction * (high_price - low_price));
        }
    }
    FLOOR_PRICE
}

/// Keepers are cheapest, forwards most expensive.
pub fn position_multiplier(position: Position) -> f64 {
    match position {
        Position::GK => 0.75,
        Position::DEF => 0.85,
        Position::MID => 1.0,
        Position::FWD => 1.2,
    }
}

pub fn apply_position_adjustment(base_price: f64, position: Position) -> f64 {
    round_to_half(base_price * position_multiplier(position))
}

/// Price a batch of players. Output is ordered from most to least valuable.
pub fn price_players(mut players: Vec<RawPlayer>) -> Result<Vec<Player>> {
    let total = players.len();
    if total < 2 {
        return Err(FantasyError::InsufficientPlayers { found: total });
    }

    players.sort_by(|a, b| b.market_value.total_cmp(&a.market_value));

    let last = (total - 1) as f64;
    Ok(players
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            let base_price = price_for_percentile(index as f64 / last);
            let fantasy_price = apply_position_adjustment(base_price, raw.position);
            Player {
                name: raw.name,
                club: raw.club,
                position: raw.position,
                market_value: raw.market_value,
                fantasy_price,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(name: &str, position: Position, market_value: f64) -> RawPlayer {
        RawPlayer {
            name: name.to_string(),
            club: "Club".to_string(),
            position,
            market_value,
        }
    }

    #[test]
    fn test_parse_market_value_suffixes() {
        assert_eq!(parse_market_value("€1.50m"), 1.5);
        assert_eq!(parse_market_value("€500k"), 0.5);
        assert_eq!(parse_market_value("€1,200k"), 1.2);
        assert_eq!(parse_market_value("€2.5M"), 2.5);
        assert_eq!(parse_market_value(" 300K "), 0.3);
    }

    #[test]
    fn test_parse_market_value_sentinel_and_garbage() {
        assert_eq!(parse_market_value("-"), UNKNOWN_MARKET_VALUE);
        assert_eq!(parse_market_value(" - "), UNKNOWN_MARKET_VALUE);
        assert_eq!(parse_market_value("unknown"), UNKNOWN_MARKET_VALUE);
        assert_eq!(parse_market_value("€1.5"), UNKNOWN_MARKET_VALUE);
        assert_eq!(parse_market_value(""), UNKNOWN_MARKET_VALUE);
    }

    #[test]
    fn test_parse_market_value_skips_unsuffixed_numbers() {
        assert_eq!(parse_market_value("2024: 3m"), 3.0);
        assert_eq!(parse_market_value("1.2.3m"), 1.2);
    }

    #[test]
    fn test_breakpoints_hit_exactly() {
        for (pct, price) in PRICE_BREAKPOINTS {
            assert_eq!(price_for_percentile(pct), price);
        }
    }

    #[test]
    fn test_interpolation_rounds_to_half() {
        // Halfway between 25% (6.0) and 75% (5.0) is 5.5
        assert_eq!(price_for_percentile(0.5), 5.5);
        // 3% sits halfway between 10.0 and 8.0
        assert_eq!(price_for_percentile(0.03), 9.0);
        assert_eq!(price_for_percentile(1.5), 4.0);
        assert_eq!(price_for_percentile(-0.1), 4.0);
    }

    #[test]
    fn test_percentile_price_is_monotone_and_half_steps() {
        let mut previous = f64::INFINITY;
        for step in 0..=1000 {
            let price = price_for_percentile(step as f64 / 1000.0);
            assert!(price <= previous, "price rose at step {step}");
            assert_eq!((price * 2.0).fract(), 0.0);
            assert!((4.0..=12.5).contains(&price));
            previous = price;
        }
    }

    #[test]
    fn test_position_adjustment() {
        assert_eq!(apply_position_adjustment(12.5, Position::FWD), 15.0);
        assert_eq!(apply_position_adjustment(12.5, Position::GK), 9.5);
        assert_eq!(apply_position_adjustment(4.0, Position::DEF), 3.5);
        assert_eq!(apply_position_adjustment(5.0, Position::MID), 5.0);
    }

    #[test]
    fn test_unknown_value_base_adjusts_to_zero() {
        let base = parse_market_value("-");
        for position in Position::ALL {
            assert_eq!(apply_position_adjustment(base, position), 0.0);
        }
    }

    #[test]
    fn test_price_players_orders_and_prices() {
        let priced = price_players(vec![
            raw("Cheap", Position::MID, 0.2),
            raw("Star", Position::FWD, 3.0),
            raw("Middle", Position::GK, 1.0),
        ])
        .unwrap();

        let names: Vec<_> = priced.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Star", "Middle", "Cheap"]);
        // Star: percentile 0 -> 12.5 * 1.2
        assert_eq!(priced[0].fantasy_price, 15.0);
        // Middle: percentile 0.5 -> 5.5 * 0.75 = 4.125
        assert_eq!(priced[1].fantasy_price, 4.0);
        // Cheap: percentile 1 -> 4.0 * 1.0
        assert_eq!(priced[2].fantasy_price, 4.0);
    }

    #[test]
    fn test_price_players_needs_two() {
        assert!(matches!(
            price_players(vec![raw("Solo", Position::MID, 1.0)]),
            Err(FantasyError::InsufficientPlayers { found: 1 })
        ));
        assert!(matches!(
            price_players(Vec::new()),
            Err(FantasyError::InsufficientPlayers { found: 0 })
        ));
    }

    #[test]
    fn test_price_players_is_deterministic_for_ties() {
        let batch = vec![
            raw("First", Position::MID, 1.0),
            raw("Second", Position::MID, 1.0),
            raw("Third", Position::MID, 0.5),
        ];
        let a = price_players(batch.clone()).unwrap();
        let b = price_players(batch).unwrap();
        assert_eq!(a, b);
        assert_eq!(a[0].name, "First");
    }
}
