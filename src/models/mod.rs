//! Data structures for the tournament simulation: teams, matches, standings,
//! bracket value objects, and session state.

mod bracket;
mod game;
mod session;
mod standings;
mod team;

pub use bracket::{BracketMatchup, FullKnockoutBracket, KnockoutRoundBracket, QualifierSlot};
pub use game::{CardEvent, CardKind, GameRound, GoalEvent, Lineup, MatchRecord, GROUP_STAGE};
pub use session::{SelectedSquad, Session, SessionError, SessionId, View};
pub use standings::{GroupStanding, Standings};
pub use team::{FormationRules, Player, PlayerCategory, Team, TeamKey};
