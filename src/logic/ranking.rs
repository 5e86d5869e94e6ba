//! Group ranking and qualification: points/goal-difference/head-to-head
//! ordering, and the best-third-placed-teams selection.

use crate::logic::outcome::parse_score;
use crate::models::{GroupStanding, MatchRecord, Standings};
use rand::Rng;
use std::cmp::Ordering;

/// Rank the rows of one group, best first.
///
/// Ordering: points, goal difference, goals for (all descending), then the
/// head-to-head result between the tied pair from the processed matches
/// (a drawn head-to-head falls through), then name ascending.
pub fn sort_group(rows: &[GroupStanding], processed: &[&MatchRecord]) -> Vec<GroupStanding> {
    let mut sorted = rows.to_vec();
    sorted.sort_by(|a, b| {
        record_order(a, b)
            .then_with(|| head_to_head_order(a, b, processed))
            .then_with(|| a.name.cmp(&b.name))
    });
    sorted
}

/// Points, goal difference, goals for - descending.
fn record_order(a: &GroupStanding, b: &GroupStanding) -> Ordering {
    b.points
        .cmp(&a.points)
        .then_with(|| b.goal_difference.cmp(&a.goal_difference))
        .then_with(|| b.goals_for.cmp(&a.goals_for))
}

fn head_to_head_order(a: &GroupStanding, b: &GroupStanding, processed: &[&MatchRecord]) -> Ordering {
    let Some(m) = processed.iter().find(|m| {
        m.is_group_stage()
            && ((m.team1 == a.team_key && m.team2 == b.team_key)
                || (m.team1 == b.team_key && m.team2 == a.team_key))
    }) else {
        return Ordering::Equal;
    };
    // Group matches have no extra time or penalties; the regulation score
    // decides the head-to-head.
    let Some((s1, s2)) = parse_score(&m.score) else {
        return Ordering::Equal;
    };
    let winner = match s1.cmp(&s2) {
        Ordering::Greater => &m.team1,
        Ordering::Less => &m.team2,
        Ordering::Equal => return Ordering::Equal,
    };
    if *winner == a.team_key {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

/// The four best third-placed teams across all groups, ranked by the same
/// points/goal-difference/goals-for criteria. Records tied on all three are
/// separated by drawing of lots via the supplied RNG, so tied inputs may
/// come back in any order between sessions.
pub fn best_third_placed_teams(
    standings: &Standings,
    processed: &[&MatchRecord],
    rng: &mut impl Rng,
) -> Vec<GroupStanding> {
    let mut thirds: Vec<(GroupStanding, u32)> = standings
        .groups
        .values()
        .filter_map(|rows| sort_group(rows, processed).into_iter().nth(2))
        .map(|row| (row, rng.gen::<u32>()))
        .collect();
    thirds.sort_by(|(a, lot_a), (b, lot_b)| record_order(a, b).then_with(|| lot_a.cmp(lot_b)));
    thirds.truncate(4);
    thirds.into_iter().map(|(row, _)| row).collect()
}
