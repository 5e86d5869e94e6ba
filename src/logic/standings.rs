//! Standings tracker: zero-initialized group tables, incrementally updated
//! as group matches are processed.

use crate::data::ReferenceData;
use crate::logic::outcome::parse_score;
use crate::models::{GroupStanding, MatchRecord, Standings};

/// One zeroed row per team per its defined group.
pub fn initialize_standings(reference: &ReferenceData) -> Standings {
    let mut standings = Standings::default();
    for (group, keys) in reference.groups() {
        let rows = keys
            .iter()
            .map(|key| GroupStanding::new(key.clone(), reference.team_name(key)))
            .collect();
        standings.groups.insert(group.clone(), rows);
    }
    standings
}

/// Apply one match to the standings. No-op for non-group matches or groups
/// absent from the table. Group matches never go to extra time or penalties
/// in this tournament format, so the regulation score is definitive.
///
/// Not idempotent: the caller must apply each match id at most once (the
/// controller's processed-id set enforces this).
pub fn apply_match_to_standings(standings: &mut Standings, m: &MatchRecord) {
    if !m.is_group_stage() {
        return;
    }
    let Some(group) = m.group.as_deref() else {
        return;
    };
    if !standings.groups.contains_key(group) {
        return;
    }
    let Some((goals1, goals2)) = parse_score(&m.score) else {
        log::warn!("Unparseable group score '{}' for match {}", m.score, m.id);
        return;
    };

    apply_to_row(standings, group, &m.team1, goals1, goals2);
    apply_to_row(standings, group, &m.team2, goals2, goals1);
}

fn apply_to_row(standings: &mut Standings, group: &str, team: &str, scored: u32, conceded: u32) {
    let Some(row) = standings.row_mut(group, team) else {
        return;
    };
    row.played += 1;
    row.goals_for += scored;
    row.goals_against += conceded;
    row.goal_difference = row.goals_for as i32 - row.goals_against as i32;
    if scored > conceded {
        row.won += 1;
        row.points += 3;
    } else if scored == conceded {
        row.drawn += 1;
        row.points += 1;
    } else {
        row.lost += 1;
    }
}
