//! Merging partial records from several field groups into one per player

use std::collections::HashMap;

use tracing::warn;

use super::types::StatRecord;

fn overlay<T>(base: &mut Option<T>, newer: Option<T>) {
    if newer.is_some() {
        *base = newer;
    }
}

fn absorb(existing: &mut StatRecord, record: StatRecord) {
    overlay(&mut existing.team, record.team);
    overlay(&mut existing.goals, record.goals);
    overlay(&mut existing.assists, record.assists);
    overlay(&mut existing.minutes_played, record.minutes_played);
    overlay(&mut existing.yellow_cards, record.yellow_cards);
    overlay(&mut existing.red_cards, record.red_cards);
    overlay(&mut existing.clean_sheet, record.clean_sheet);
    overlay(&mut existing.penalty_miss, record.penalty_miss);
    overlay(&mut existing.own_goals, record.own_goals);
}

/// Group records by player and team. A later record's present fields
/// override earlier ones; players keep the order in which they were first
/// seen.
///
/// Records without a team join the single entry carrying that name. When
/// the name belongs to players of several teams the record cannot be
/// attributed and is dropped with a warning.
pub fn merge_records(records: Vec<StatRecord>) -> Vec<StatRecord> {
    let mut merged: Vec<StatRecord> = Vec::new();
    let mut by_key: HashMap<(String, String), usize> = HashMap::new();
    let mut teamless: Vec<StatRecord> = Vec::new();

    for record in records {
        let Some(team) = record.team.as_ref().map(|t| t.name.clone()) else {
            teamless.push(record);
            continue;
        };
        let key = (record.player.name.clone(), team);
        match by_key.get(&key) {
            Some(&idx) => absorb(&mut merged[idx], record),
            None => {
                by_key.insert(key, merged.len());
                merged.push(record);
            }
        }
    }

    for record in teamless {
        let same_name: Vec<usize> = merged
            .iter()
            .enumerate()
            .filter(|(_, m)| m.player.name == record.player.name)
            .map(|(idx, _)| idx)
            .collect();
        match same_name.as_slice() {
            [] => merged.push(record),
            [idx] => absorb(&mut merged[*idx], record),
            _ => warn!(
                "Skipping teamless record for {}: {} players share the name",
                record.player.name,
                same_name.len()
            ),
        }
    }

    merged
}
