//! Tournament statistics over processed matches: top scorers and the
//! pulse summary.

use crate::data::ReferenceData;
use crate::models::{MatchRecord, TeamKey};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One row of the top scorers table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PlayerScore {
    pub name: String,
    pub team_key: TeamKey,
    pub team_name: String,
    pub goals: u32,
}

/// Goal tally per player across processed matches, own goals excluded,
/// sorted by goals descending then name ascending.
pub fn top_scorers(processed: &[&MatchRecord], reference: &ReferenceData) -> Vec<PlayerScore> {
    let mut tallies: HashMap<(TeamKey, String), u32> = HashMap::new();
    for m in processed {
        for goal in &m.goal_scorers {
            if goal.is_own_goal() {
                continue;
            }
            *tallies
                .entry((goal.team.clone(), goal.player.clone()))
                .or_insert(0) += 1;
        }
    }
    let mut scorers: Vec<PlayerScore> = tallies
        .into_iter()
        .map(|((team_key, name), goals)| PlayerScore {
            team_name: reference.team_name(&team_key),
            name,
            team_key,
            goals,
        })
        .collect();
    scorers.sort_by(|a, b| b.goals.cmp(&a.goals).then_with(|| a.name.cmp(&b.name)));
    scorers
}

/// Headline numbers for the tournament pulse screen.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentPulse {
    pub matches_played: usize,
    pub total_goals: u32,
    pub goals_per_match: f64,
}

pub fn tournament_pulse(processed: &[&MatchRecord]) -> TournamentPulse {
    let matches_played = processed.len();
    let total_goals: u32 = processed
        .iter()
        .map(|m| m.goal_scorers.len() as u32)
        .sum();
    let goals_per_match = if matches_played == 0 {
        0.0
    } else {
        f64::from(total_goals) / matches_played as f64
    };
    TournamentPulse {
        matches_played,
        total_goals,
        goals_per_match,
    }
}
