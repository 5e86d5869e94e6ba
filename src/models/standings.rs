//! Group standings: per-team counters owned by the standings tracker.

use crate::models::team::TeamKey;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mutable counters for one team in its group.
///
/// Invariants (held by the standings tracker, checked in tests):
/// `goal_difference = goals_for - goals_against`, `points = 3*won + drawn`,
/// `played = won + drawn + lost`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupStanding {
    pub team_key: TeamKey,
    pub name: String,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub goal_difference: i32,
    pub points: u32,
}

impl GroupStanding {
    /// Zeroed row for a team at tournament start.
    pub fn new(team_key: impl Into<TeamKey>, name: impl Into<String>) -> Self {
        Self {
            team_key: team_key.into(),
            name: name.into(),
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }
}

/// Standings table: one row per team per group, rows in group-definition order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standings {
    pub groups: BTreeMap<String, Vec<GroupStanding>>,
}

impl Standings {
    pub fn group(&self, group: &str) -> Option<&[GroupStanding]> {
        self.groups.get(group).map(|rows| rows.as_slice())
    }

    pub fn row_mut(&mut self, group: &str, team_key: &str) -> Option<&mut GroupStanding> {
        self.groups
            .get_mut(group)?
            .iter_mut()
            .find(|row| row.team_key == team_key)
    }
}
