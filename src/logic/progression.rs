//! Round progression controller: drives the session through the fixed round
//! sequence, commits match results to aggregate state, and detects
//! elimination and tournament end.

use crate::data::{ReferenceData, FINAL};
use crate::logic::bracket::generate_bracket;
use crate::logic::outcome::winner_of;
use crate::logic::squad::validate_squad_selection;
use crate::logic::standings::apply_match_to_standings;
use crate::models::{
    FullKnockoutBracket, MatchRecord, SelectedSquad, Session, SessionError, View,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

/// Resolve the session's processed match ids to schedule records, in
/// processing order.
pub fn processed_records<'a>(
    session: &Session,
    reference: &'a ReferenceData,
) -> Vec<&'a MatchRecord> {
    session
        .processed
        .iter()
        .filter_map(|id| reference.match_by_id(id))
        .collect()
}

/// Regenerate the knockout bracket from current session state. The lots
/// tie-break uses the session's fixed seed, so repeated calls within one
/// session agree.
pub fn regenerate_bracket(session: &Session, reference: &ReferenceData) -> FullKnockoutBracket {
    let records = processed_records(session, reference);
    let mut rng = StdRng::seed_from_u64(session.lots_seed);
    generate_bracket(
        &records,
        &session.standings,
        reference,
        &session.user_team_key,
        &mut rng,
    )
}

/// Confirm the chosen team's squad and move on to the kickoff screen.
pub fn confirm_team(session: &mut Session) -> Result<(), SessionError> {
    expect_view(session, View::ConfirmSquad)?;
    session.view = View::Kickoff;
    Ok(())
}

/// Kick off: load the first round's fixtures.
pub fn start_tournament(session: &mut Session) -> Result<(), SessionError> {
    expect_view(session, View::Kickoff)?;
    session.current_round = 0;
    session.view = View::Fixtures;
    Ok(())
}

/// Head into the user's fixture for this round. The round can instead be
/// simulated wholesale via [`process_round`] when the user has no match.
pub fn go_to_user_match(
    session: &mut Session,
    reference: &ReferenceData,
) -> Result<(), SessionError> {
    expect_view(session, View::Fixtures)?;
    if reference
        .user_match_for_round(session.current_round, &session.user_team_key)
        .is_none()
    {
        return Err(SessionError::NoUserMatchInRound);
    }
    session.view = View::PreGame;
    Ok(())
}

pub fn begin_squad_selection(session: &mut Session) -> Result<(), SessionError> {
    expect_view(session, View::PreGame)?;
    session.view = View::SquadSelect;
    Ok(())
}

/// Validate and store the user's squad, then start match playback.
pub fn confirm_squad(
    session: &mut Session,
    reference: &ReferenceData,
    starters: Vec<u8>,
    subs: Vec<u8>,
    formation: String,
) -> Result<(), SessionError> {
    expect_view(session, View::SquadSelect)?;
    let team = reference
        .team(&session.user_team_key)
        .ok_or_else(|| SessionError::UnknownTeam(session.user_team_key.clone()))?;
    validate_squad_selection(team, &starters, &subs, &formation, reference)?;
    session.selected_squad = Some(SelectedSquad {
        starters,
        subs,
        formation,
    });
    session.view = View::InProgress;
    Ok(())
}

pub fn finish_playback(session: &mut Session) -> Result<(), SessionError> {
    expect_view(session, View::InProgress)?;
    session.view = View::Aftermath;
    Ok(())
}

/// Commit every not-yet-processed fixture of the current round: extend the
/// processed-id set and fold group results into the standings. The dedup by
/// id is what keeps the standings tracker's at-most-once contract.
///
/// Valid from the fixtures screen (simulate the whole round) or the
/// aftermath of the user's match. Returns how many matches were newly
/// processed.
pub fn process_round(
    session: &mut Session,
    reference: &ReferenceData,
) -> Result<usize, SessionError> {
    if session.view != View::Fixtures && session.view != View::Aftermath {
        return Err(SessionError::InvalidView);
    }
    let newly: Vec<&MatchRecord> = reference
        .matches_for_round(session.current_round)
        .into_iter()
        .filter(|m| !session.has_processed(&m.id))
        .collect();
    let count = newly.len();
    for m in newly {
        apply_match_to_standings(&mut session.standings, m);
        session.processed.push(m.id.clone());
    }
    session.selected_squad = None;
    session.view = View::RoundResults;
    Ok(count)
}

/// Group rounds show the standings next; knockout rounds go straight to the
/// top scorers.
pub fn continue_from_results(
    session: &mut Session,
    reference: &ReferenceData,
) -> Result<(), SessionError> {
    expect_view(session, View::RoundResults)?;
    let is_group = reference
        .rounds()
        .get(session.current_round)
        .map(|r| r.is_group_stage)
        .unwrap_or(false);
    session.view = if is_group {
        View::Standings
    } else {
        View::TopScorers
    };
    Ok(())
}

pub fn continue_from_standings(session: &mut Session) -> Result<(), SessionError> {
    expect_view(session, View::Standings)?;
    session.view = View::TopScorers;
    Ok(())
}

pub fn continue_from_top_scorers(session: &mut Session) -> Result<(), SessionError> {
    expect_view(session, View::TopScorers)?;
    session.view = View::News;
    Ok(())
}

pub fn continue_from_news(session: &mut Session) -> Result<(), SessionError> {
    expect_view(session, View::News)?;
    session.view = View::Pulse;
    Ok(())
}

/// Leaving the pulse screen: transitions into or within the knockout stage
/// show the bracket first; group-to-group transitions advance directly.
pub fn continue_from_pulse(
    session: &mut Session,
    reference: &ReferenceData,
) -> Result<(), SessionError> {
    expect_view(session, View::Pulse)?;
    let rounds = reference.rounds();
    let next = session.current_round + 1;
    let current_is_group = rounds
        .get(session.current_round)
        .map(|r| r.is_group_stage)
        .unwrap_or(false);
    let next_is_knockout = rounds.get(next).map(|r| !r.is_group_stage).unwrap_or(false);

    if (current_is_group && next_is_knockout) || (!current_is_group && next < rounds.len()) {
        session.bracket = Some(regenerate_bracket(session, reference));
        session.view = View::Bracket;
    } else {
        advance_to_next_round(session, reference);
    }
    Ok(())
}

/// Leaving the bracket screen: end the tournament if the final round is
/// fully decided, end the user's run if the bracket no longer holds their
/// team, otherwise advance to the next round's fixtures.
pub fn continue_from_bracket(
    session: &mut Session,
    reference: &ReferenceData,
) -> Result<(), SessionError> {
    expect_view(session, View::Bracket)?;
    let bracket = match session.bracket.clone() {
        Some(b) => b,
        None => regenerate_bracket(session, reference),
    };
    let rounds = reference.rounds();
    let next = session.current_round + 1;

    let finals_decided = rounds
        .last()
        .and_then(|r| bracket.round(&r.name))
        .map(|r| r.matches.iter().all(|m| m.winner_key.is_some()))
        .unwrap_or(false);
    if next >= rounds.len() && finals_decided {
        session.view = View::GameOver;
        return Ok(());
    }

    if user_still_in_bracket(&bracket, &session.user_team_key) {
        advance_to_next_round(session, reference);
    } else {
        session.view = View::GameOver;
    }
    Ok(())
}

/// Whether the user still has a path through the bracket: present in the
/// round after the last one with recorded winners, or (before any knockout
/// result) in the first knockout round, or winner of the final once the last
/// round is fully played.
fn user_still_in_bracket(bracket: &FullKnockoutBracket, user_team_key: &str) -> bool {
    let last_played = bracket
        .rounds
        .iter()
        .rposition(|round| round.matches.iter().any(|m| m.winner_key.is_some()));
    match last_played {
        None => bracket
            .rounds
            .first()
            .map(|r| r.matches.iter().any(|m| m.involves(user_team_key)))
            .unwrap_or(false),
        Some(i) if i + 1 < bracket.rounds.len() => bracket.rounds[i + 1]
            .matches
            .iter()
            .any(|m| m.involves(user_team_key)),
        Some(i) => {
            let round = &bracket.rounds[i];
            if round.matches.iter().all(|m| m.winner_key.is_some()) {
                round
                    .matches
                    .iter()
                    .find(|m| m.match_id == FINAL)
                    .map(|m| m.winner_key.as_deref() == Some(user_team_key))
                    .unwrap_or(false)
            } else {
                round.matches.iter().any(|m| {
                    (m.involves(user_team_key) && m.winner_key.is_none())
                        || m.winner_key.as_deref() == Some(user_team_key)
                })
            }
        }
    }
}

/// Move to the next round's fixtures, or show the bracket when the user is
/// eliminated or the schedule is exhausted (the bracket screen then routes
/// to game over).
fn advance_to_next_round(session: &mut Session, reference: &ReferenceData) {
    let rounds = reference.rounds();
    let next = session.current_round + 1;
    if next >= rounds.len() {
        session.bracket = Some(regenerate_bracket(session, reference));
        session.view = View::Bracket;
        return;
    }

    let mut eliminated = false;
    if !rounds[next].is_group_stage {
        // First the literal next round's historical fixtures, then the live
        // bracket's slots for that round.
        let mut participates = reference
            .matches_for_round(next)
            .iter()
            .any(|m| m.involves(&session.user_team_key));
        if !participates {
            let bracket = regenerate_bracket(session, reference);
            participates = bracket
                .round(&rounds[next].name)
                .map(|r| r.matches.iter().any(|m| m.involves(&session.user_team_key)))
                .unwrap_or(false);
            session.bracket = Some(bracket);
        }
        eliminated = !participates;
    }

    if eliminated {
        if session.bracket.is_none() {
            session.bracket = Some(regenerate_bracket(session, reference));
        }
        session.view = View::Bracket;
    } else {
        session.current_round = next;
        session.selected_squad = None;
        session.view = View::Fixtures;
    }
}

/// End-of-tournament narrative.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub title: String,
    pub message: String,
}

/// Phrase the user's outcome from the last processed match they played:
/// champion, runner-up, or eliminated in a named round.
pub fn game_over_report(session: &Session, reference: &ReferenceData) -> GameOverReport {
    let processed = processed_records(session, reference);
    let champion = processed
        .iter()
        .find(|m| m.id == FINAL)
        .and_then(|m| winner_of(m, reference));
    let champion_name = champion
        .as_deref()
        .map(|k| reference.team_name(k).to_uppercase());
    let user_name = session.user_team_name.to_uppercase();

    if champion.as_deref() == Some(session.user_team_key.as_str()) {
        return GameOverReport {
            title: "CHAMPIONS!".to_string(),
            message: format!(
                "CONGRATULATIONS! {} HAS WON THE 1994 WORLD CUP!",
                user_name
            ),
        };
    }

    let last_user_match = processed
        .iter()
        .rev()
        .find(|m| m.involves(&session.user_team_key));

    let mut message = match last_user_match {
        Some(m) if m.id == FINAL => format!(
            "{} FINISHED AS RUNNER-UP.\n{} ARE THE CHAMPIONS.",
            user_name,
            champion_name.as_deref().unwrap_or("THE WINNER")
        ),
        Some(m) => {
            let round_name = reference
                .rounds()
                .iter()
                .find(|r| r.match_ids.contains(&m.id))
                .map(|r| r.name.to_uppercase())
                .unwrap_or_else(|| m.round.to_uppercase());
            format!("YOUR JOURNEY WITH {} ENDED IN THE {}.", user_name, round_name)
        }
        None => {
            let in_group_stage = reference
                .rounds()
                .get(session.current_round)
                .map(|r| r.is_group_stage)
                .unwrap_or(true);
            if in_group_stage {
                format!("YOUR TEAM, {}, DID NOT ADVANCE FROM THE GROUP STAGES.", user_name)
            } else {
                format!("YOUR JOURNEY WITH {} HAS ENDED.", user_name)
            }
        }
    };

    if let Some(name) = champion_name {
        if !message.contains("ARE THE CHAMPIONS") {
            message.push_str(&format!("\n{} WENT ON TO WIN THE TOURNAMENT.", name));
        }
    }

    GameOverReport {
        title: "GAME OVER".to_string(),
        message,
    }
}

fn expect_view(session: &Session, view: View) -> Result<(), SessionError> {
    if session.view == view {
        Ok(())
    } else {
        Err(SessionError::InvalidView)
    }
}
