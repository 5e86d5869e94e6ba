//! Engine logic: standings, outcome resolution, ranking, bracket
//! generation, squad validation, statistics, and round progression.

mod bracket;
mod outcome;
mod progression;
mod ranking;
mod squad;
mod standings;
mod stats;

pub use bracket::generate_bracket;
pub use outcome::{parse_minute, parse_score, score_from_events, winner_of};
pub use progression::{
    begin_squad_selection, confirm_squad, confirm_team, continue_from_bracket,
    continue_from_news, continue_from_pulse, continue_from_results, continue_from_standings,
    continue_from_top_scorers, finish_playback, game_over_report, go_to_user_match,
    process_round, processed_records, regenerate_bracket, start_tournament, GameOverReport,
};
pub use ranking::{best_third_placed_teams, sort_group};
pub use squad::{validate_squad_selection, MAX_SUBS, STARTERS};
pub use standings::{apply_match_to_standings, initialize_standings};
pub use stats::{top_scorers, tournament_pulse, PlayerScore, TournamentPulse};
