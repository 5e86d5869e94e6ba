//! Knockout bracket value objects: ephemeral, regenerated on demand.

use crate::models::team::TeamKey;
use serde::{Deserialize, Serialize};

/// A semantic qualification position feeding a Round-of-16 fixture,
/// independent of which team currently fills it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "group")]
pub enum QualifierSlot {
    GroupWinner(char),
    GroupRunnerUp(char),
    BestThird(char),
}

impl QualifierSlot {
    pub fn group(&self) -> char {
        match self {
            QualifierSlot::GroupWinner(g)
            | QualifierSlot::GroupRunnerUp(g)
            | QualifierSlot::BestThird(g) => *g,
        }
    }

    /// Display label, e.g. "Winner Group C" or "3rd Place F".
    pub fn label(&self) -> String {
        match self {
            QualifierSlot::GroupWinner(g) => format!("Winner Group {}", g),
            QualifierSlot::GroupRunnerUp(g) => format!("Runner-up Group {}", g),
            QualifierSlot::BestThird(g) => format!("3rd Place {}", g),
        }
    }
}

/// One fixture of the knockout bracket as currently derivable: slot labels
/// always present, team keys only once the feeding group/match is resolved,
/// result fields only once the match itself has been processed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct BracketMatchup {
    pub match_id: String,
    pub round_title: String,
    pub slot1: String,
    pub slot2: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1_key: Option<TeamKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2_key: Option<TeamKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team1_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team2_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub penalties: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub winner_key: Option<TeamKey>,
    pub user_is_team1: bool,
    pub user_is_team2: bool,
}

impl BracketMatchup {
    pub fn new(match_id: impl Into<String>, round_title: impl Into<String>) -> Self {
        Self {
            match_id: match_id.into(),
            round_title: round_title.into(),
            slot1: String::new(),
            slot2: String::new(),
            team1_key: None,
            team2_key: None,
            team1_name: None,
            team2_name: None,
            score: None,
            penalties: None,
            winner_key: None,
            user_is_team1: false,
            user_is_team2: false,
        }
    }

    pub fn involves(&self, team_key: &str) -> bool {
        self.team1_key.as_deref() == Some(team_key) || self.team2_key.as_deref() == Some(team_key)
    }
}

/// All matchups of one knockout round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct KnockoutRoundBracket {
    pub round_name: String,
    pub matches: Vec<BracketMatchup>,
}

/// Round of 16 through Final and Third-Place playoff, in round order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct FullKnockoutBracket {
    pub rounds: Vec<KnockoutRoundBracket>,
}

impl FullKnockoutBracket {
    pub fn round(&self, round_name: &str) -> Option<&KnockoutRoundBracket> {
        self.rounds.iter().find(|r| r.round_name == round_name)
    }
}
