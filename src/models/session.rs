//! Tournament session: the explicit state value owned by the progression
//! controller, plus the session error taxonomy.

use crate::data::ReferenceData;
use crate::models::bracket::FullKnockoutBracket;
use crate::models::standings::Standings;
use crate::models::team::{PlayerCategory, TeamKey};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Errors that can occur during session operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// No team with this key in the reference data.
    UnknownTeam(TeamKey),
    /// The session is not in a view that allows this action. Policy: the
    /// caller resets the session to the main menu.
    InvalidView,
    /// The user's team has no fixture in the current round; the round can
    /// still be simulated without user participation.
    NoUserMatchInRound,
    /// Wrong number of starters selected (must be exactly 11).
    WrongStarterCount { needed: usize, selected: usize },
    /// Too many substitutes selected.
    TooManySubs { allowed: usize, selected: usize },
    /// A selected jersey number is not in the user's squad.
    UnknownPlayerNumber(u8),
    /// A jersey number appears twice across starters and subs.
    DuplicatePlayerNumber(u8),
    /// No formation with this key in the reference data.
    UnknownFormation(String),
    /// Starter counts do not match the chosen formation's requirements.
    FormationMismatch {
        category: PlayerCategory,
        needed: u8,
        selected: u8,
    },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::UnknownTeam(key) => write!(f, "Unknown team '{}'", key),
            SessionError::InvalidView => write!(f, "Invalid view for this action"),
            SessionError::NoUserMatchInRound => {
                write!(f, "No match for your team in this round")
            }
            SessionError::WrongStarterCount { needed, selected } => {
                write!(f, "Need exactly {} starters (selected {})", needed, selected)
            }
            SessionError::TooManySubs { allowed, selected } => {
                write!(f, "At most {} substitutes allowed (selected {})", allowed, selected)
            }
            SessionError::UnknownPlayerNumber(n) => {
                write!(f, "No player with jersey number {} in your squad", n)
            }
            SessionError::DuplicatePlayerNumber(n) => {
                write!(f, "Jersey number {} selected twice", n)
            }
            SessionError::UnknownFormation(key) => write!(f, "Unknown formation '{}'", key),
            SessionError::FormationMismatch {
                category,
                needed,
                selected,
            } => write!(f, "{}: need {}, got {}", category, needed, selected),
        }
    }
}

/// Unique identifier for a session.
pub type SessionId = Uuid;

/// Current screen of the session's strictly linear per-round sequence.
/// Group rounds skip `Bracket`; knockout rounds skip `Standings`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    ConfirmSquad,
    Kickoff,
    Fixtures,
    PreGame,
    SquadSelect,
    InProgress,
    Aftermath,
    RoundResults,
    Standings,
    TopScorers,
    News,
    Pulse,
    Bracket,
    GameOver,
}

/// The user's squad selection for their current match.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SelectedSquad {
    pub starters: Vec<u8>,
    pub subs: Vec<u8>,
    pub formation: String,
}

/// Full session state: user team, progression position, and the aggregate
/// state derived from processed matches. Owned by one controller, updated
/// synchronously, reset as a whole.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub user_team_key: TeamKey,
    pub user_team_name: String,
    pub current_round: usize,
    pub view: View,
    pub standings: Standings,
    /// Ids of processed matches, in processing order. Guards the standings
    /// tracker against double application.
    pub processed: Vec<String>,
    /// Last generated bracket snapshot (knockout transitions only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bracket: Option<FullKnockoutBracket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_squad: Option<SelectedSquad>,
    /// Seed for the drawing-of-lots tie-break, fixed per session so a
    /// regenerated bracket is stable within one tournament.
    pub lots_seed: u64,
}

impl Session {
    /// Create a session for the chosen team, with zeroed standings.
    pub fn new(reference: &ReferenceData, team_key: &str) -> Result<Self, SessionError> {
        let team = reference
            .team(team_key)
            .ok_or_else(|| SessionError::UnknownTeam(team_key.to_string()))?;
        Ok(Self {
            id: Uuid::new_v4(),
            user_team_key: team.key.clone(),
            user_team_name: team.name.clone(),
            current_round: 0,
            view: View::ConfirmSquad,
            standings: crate::logic::initialize_standings(reference),
            processed: Vec::new(),
            bracket: None,
            selected_squad: None,
            lots_seed: rand::thread_rng().gen(),
        })
    }

    /// Abandon the current progression: back to the start with the same team
    /// and freshly zeroed aggregate state.
    pub fn reset(&mut self, reference: &ReferenceData) {
        self.current_round = 0;
        self.view = View::ConfirmSquad;
        self.standings = crate::logic::initialize_standings(reference);
        self.processed.clear();
        self.bracket = None;
        self.selected_squad = None;
        self.lots_seed = rand::thread_rng().gen();
    }

    pub fn has_processed(&self, match_id: &str) -> bool {
        self.processed.iter().any(|id| id == match_id)
    }
}
