//! Knockout bracket generation: maps each historical knockout fixture onto a
//! semantic slot and resolves the slot to the currently simulated qualifier.
//!
//! The bracket structure (which slot plays which slot) is fixed by the
//! historical schedule; the slot occupants are re-derived from live
//! standings and processed results every time this runs.

use crate::data::{self, ReferenceData, FINAL, SEMI_FINAL_1, SEMI_FINAL_2, THIRD_PLACE};
use crate::logic::outcome::winner_of;
use crate::logic::ranking::{best_third_placed_teams, sort_group};
use crate::models::{
    BracketMatchup, FullKnockoutBracket, GroupStanding, KnockoutRoundBracket, MatchRecord,
    QualifierSlot, Standings, TeamKey,
};
use rand::Rng;
use std::collections::HashMap;

/// Build the full Round-of-16 through Final/Third-Place bracket from the
/// current simulation state. Pure: re-derivable at any time, consistent with
/// all processed matches so far; slots whose feeders are unresolved keep
/// their descriptive label and no team key.
pub fn generate_bracket(
    processed: &[&MatchRecord],
    standings: &Standings,
    reference: &ReferenceData,
    user_team_key: &str,
    rng: &mut impl Rng,
) -> FullKnockoutBracket {
    let mut sorted_groups: HashMap<String, Vec<GroupStanding>> = HashMap::new();
    for (group, _) in reference.groups() {
        if let Some(rows) = standings.group(group) {
            sorted_groups.insert(group.clone(), sort_group(rows, processed));
        }
    }
    let best_third_keys: Vec<TeamKey> = best_third_placed_teams(standings, processed, rng)
        .into_iter()
        .map(|row| row.team_key)
        .collect();

    let slot_definitions: HashMap<&str, (QualifierSlot, QualifierSlot)> =
        data::ro16_slot_definitions()
            .iter()
            .map(|(id, s1, s2)| (*id, (*s1, *s2)))
            .collect();

    // Recorded winners of processed knockout matches, by match id.
    let mut processed_winners: HashMap<String, TeamKey> = HashMap::new();
    for m in processed {
        if !m.is_group_stage() {
            if let Some(winner) = winner_of(m, reference) {
                processed_winners.insert(m.id.clone(), winner);
            }
        }
    }

    let mut bracket = FullKnockoutBracket::default();
    for (round_index, round) in reference.rounds().iter().enumerate() {
        if round.is_group_stage {
            continue;
        }
        let mut round_bracket = KnockoutRoundBracket {
            round_name: round.name.clone(),
            matches: Vec::new(),
        };
        for match_id in &round.match_ids {
            let Some(historical) = reference.match_by_id(match_id) else {
                continue;
            };
            let mut matchup = BracketMatchup::new(match_id.clone(), round.name.clone());

            if let Some((slot1, slot2)) = slot_definitions.get(match_id.as_str()) {
                matchup.slot1 = slot1.label();
                matchup.slot2 = slot2.label();
                matchup.team1_key = resolve_slot(slot1, &sorted_groups, &best_third_keys);
                matchup.team2_key = resolve_slot(slot2, &sorted_groups, &best_third_keys);
            } else if match_id == THIRD_PLACE {
                matchup.slot1 = format!("Loser {}", SEMI_FINAL_2);
                matchup.slot2 = format!("Loser {}", SEMI_FINAL_1);
                matchup.team1_key = semifinal_loser(SEMI_FINAL_2, processed, reference);
                matchup.team2_key = semifinal_loser(SEMI_FINAL_1, processed, reference);
            } else if match_id == FINAL {
                matchup.slot1 = format!("Winner {}", SEMI_FINAL_2);
                matchup.slot2 = format!("Winner {}", SEMI_FINAL_1);
                matchup.team1_key = processed_winners.get(SEMI_FINAL_2).cloned();
                matchup.team2_key = processed_winners.get(SEMI_FINAL_1).cloned();
            } else {
                // Quarter- and semi-finals: each side fed by the earlier
                // fixture whose historical winner is this side's historical
                // occupant; the occupant comes from the feeder's recorded
                // winner once processed.
                let origin1 = find_origin_match(&historical.team1, round_index, reference);
                let origin2 = find_origin_match(&historical.team2, round_index, reference);
                matchup.slot1 = feeder_label(&origin1, &historical.team1, reference);
                matchup.slot2 = feeder_label(&origin2, &historical.team2, reference);
                matchup.team1_key = origin1.and_then(|id| processed_winners.get(&id).cloned());
                matchup.team2_key = origin2.and_then(|id| processed_winners.get(&id).cloned());
            }

            matchup.team1_name = matchup.team1_key.as_deref().map(|k| reference.team_name(k));
            matchup.team2_name = matchup.team2_key.as_deref().map(|k| reference.team_name(k));

            if let Some(record) = processed.iter().find(|m| m.id == *match_id) {
                matchup.score = Some(
                    record
                        .extra_time_score
                        .clone()
                        .unwrap_or_else(|| record.score.clone()),
                );
                matchup.penalties = record.penalties.clone();
                matchup.winner_key = winner_of(record, reference);
            }

            matchup.user_is_team1 = matchup.team1_key.as_deref() == Some(user_team_key);
            matchup.user_is_team2 = matchup.team2_key.as_deref() == Some(user_team_key);
            round_bracket.matches.push(matchup);
        }
        bracket.rounds.push(round_bracket);
    }
    bracket
}

/// The live occupant of a Round-of-16 slot: winners and runners-up straight
/// from the sorted group; a third-placed side only if it made the best-four
/// cut.
fn resolve_slot(
    slot: &QualifierSlot,
    sorted_groups: &HashMap<String, Vec<GroupStanding>>,
    best_third_keys: &[TeamKey],
) -> Option<TeamKey> {
    let rows = sorted_groups.get(&slot.group().to_string())?;
    match slot {
        QualifierSlot::GroupWinner(_) => rows.first().map(|r| r.team_key.clone()),
        QualifierSlot::GroupRunnerUp(_) => rows.get(1).map(|r| r.team_key.clone()),
        QualifierSlot::BestThird(_) => rows
            .get(2)
            .filter(|r| best_third_keys.contains(&r.team_key))
            .map(|r| r.team_key.clone()),
    }
}

/// Walk backward through the earlier knockout rounds for the fixture whose
/// historical winner is this team: that fixture feeds the current slot.
fn find_origin_match(
    historical_team: &str,
    round_index: usize,
    reference: &ReferenceData,
) -> Option<String> {
    for round in reference.rounds()[..round_index].iter().rev() {
        if round.is_group_stage {
            continue;
        }
        for id in &round.match_ids {
            let m = reference.match_by_id(id)?;
            if winner_of(m, reference).as_deref() == Some(historical_team) {
                return Some(id.clone());
            }
        }
    }
    None
}

fn feeder_label(
    origin: &Option<String>,
    historical_team: &str,
    reference: &ReferenceData,
) -> String {
    match origin {
        Some(id) => format!("Winner {}", id),
        None => reference.team_name(historical_team),
    }
}

/// The losing side of a processed semifinal, if it has a recorded winner.
fn semifinal_loser(
    semifinal_id: &str,
    processed: &[&MatchRecord],
    reference: &ReferenceData,
) -> Option<TeamKey> {
    let record = processed.iter().find(|m| m.id == semifinal_id)?;
    let winner = winner_of(record, reference)?;
    if winner == record.team1 {
        Some(record.team2.clone())
    } else {
        Some(record.team1.clone())
    }
}
