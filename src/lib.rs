//! 1994 World Cup tournament simulation: library with reference data,
//! models, and the progression engine.

pub mod data;
pub mod logic;
pub mod models;

pub use data::{DataError, ReferenceData};
pub use logic::{
    apply_match_to_standings, begin_squad_selection, best_third_placed_teams, confirm_squad,
    confirm_team, continue_from_bracket, continue_from_news, continue_from_pulse,
    continue_from_results, continue_from_standings, continue_from_top_scorers, finish_playback,
    game_over_report, generate_bracket, go_to_user_match, initialize_standings, parse_minute,
    parse_score, process_round, processed_records, regenerate_bracket, score_from_events,
    sort_group, start_tournament, top_scorers, tournament_pulse, validate_squad_selection,
    winner_of, GameOverReport, PlayerScore, TournamentPulse,
};
pub use models::{
    BracketMatchup, FullKnockoutBracket, GameRound, GoalEvent, GroupStanding,
    KnockoutRoundBracket, Lineup, MatchRecord, Player, PlayerCategory, QualifierSlot,
    SelectedSquad, Session, SessionError, SessionId, Standings, Team, TeamKey, View,
};
