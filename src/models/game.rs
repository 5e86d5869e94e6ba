//! Match records, goal/card events, lineups, and round descriptors.

use crate::models::team::TeamKey;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Round label used by group-stage matches in the schedule.
pub const GROUP_STAGE: &str = "Group Stage";

/// A goal in a match's event timeline. Minutes keep the raw string form
/// ("45+2" for stoppage time); own goals carry `kind: "Own Goal"` and are
/// credited to the scorer's team but count for the opposition.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GoalEvent {
    pub team: TeamKey,
    pub player: String,
    pub minute: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl GoalEvent {
    pub fn is_own_goal(&self) -> bool {
        self.kind
            .as_deref()
            .map(|k| k.to_ascii_lowercase().contains("own goal"))
            .unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardKind {
    Yellow,
    Red,
}

/// A booking in a match's event timeline.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CardEvent {
    pub team: TeamKey,
    pub player: String,
    pub card: CardKind,
    pub minute: String,
}

/// Historical starting lineup for one team in one match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Lineup {
    pub starters: Vec<u8>,
    #[serde(default)]
    pub subs: Vec<u8>,
    pub formation: String,
}

/// One match of the historical schedule. Immutable reference data: processing
/// a match mutates derived aggregates (standings, processed-id set), never
/// the record itself.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    /// Stable identifier, e.g. "M37".
    pub id: String,
    pub round: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    pub date: NaiveDate,
    pub venue: String,
    pub team1: TeamKey,
    pub team2: TeamKey,
    /// Regulation (90 minute) score, "a-b".
    pub score: String,
    pub half_time_score: String,
    /// Score after extra time, if the match went to extra time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_time_score: Option<String>,
    /// Shootout result encoded as "<identity> <a>-<b> <identity>", where each
    /// identity is a team key or display name (the source data mixes both).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penalties: Option<String>,
    #[serde(default)]
    pub goal_scorers: Vec<GoalEvent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<CardEvent>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub lineups: HashMap<TeamKey, Lineup>,
}

impl MatchRecord {
    pub fn is_group_stage(&self) -> bool {
        self.round == GROUP_STAGE
    }

    pub fn involves(&self, team_key: &str) -> bool {
        self.team1 == team_key || self.team2 == team_key
    }

    /// The historical starting lineup for a team, if recorded.
    pub fn lineup_for(&self, team_key: &str) -> Option<&Lineup> {
        self.lineups.get(team_key)
    }
}

/// One entry of the fixed progression sequence: three group rounds followed
/// by the knockout rounds.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameRound {
    pub name: String,
    pub match_ids: Vec<String>,
    pub is_group_stage: bool,
}
