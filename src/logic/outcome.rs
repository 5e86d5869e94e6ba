//! Match outcome resolution: regulation/extra-time scores and penalty
//! shootout strings.

use crate::data::ReferenceData;
use crate::models::{GoalEvent, MatchRecord, TeamKey};

/// Parse an "a-b" score string.
pub fn parse_score(score: &str) -> Option<(u32, u32)> {
    let (a, b) = score.trim().split_once('-')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}

/// Parse a minute string, dropping any stoppage-time suffix: "45+2" -> 45.
pub fn parse_minute(minute: &str) -> Option<u32> {
    let base = minute.split('+').next()?;
    let digits: String = base.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Winner of a match, or `None` for a draw (a valid terminal state only for
/// group matches).
///
/// Penalties take precedence; otherwise the extra-time score if present,
/// else the regulation score. The shootout string encodes the sides by team
/// key or display name, inconsistently, so both are checked. A malformed
/// string falls back to team1 - a defensive default, not a guarantee.
pub fn winner_of(m: &MatchRecord, reference: &ReferenceData) -> Option<TeamKey> {
    if let Some(penalties) = m.penalties.as_deref() {
        return Some(shootout_winner(m, penalties, reference));
    }

    let decisive = m.extra_time_score.as_deref().unwrap_or(&m.score);
    let (s1, s2) = match parse_score(decisive) {
        Some(parsed) => parsed,
        None => {
            log::warn!("Unparseable score '{}' for match {}", decisive, m.id);
            return None;
        }
    };
    if s1 > s2 {
        Some(m.team1.clone())
    } else if s2 > s1 {
        Some(m.team2.clone())
    } else {
        None
    }
}

fn shootout_winner(m: &MatchRecord, penalties: &str, reference: &ReferenceData) -> TeamKey {
    let tokens: Vec<&str> = penalties.split_whitespace().collect();
    // The score token splits the two identities; identities may contain
    // spaces ("Saudi Arabia"), so everything before/after it is joined back.
    let score_pos = tokens.iter().position(|t| parse_score(t).is_some());
    let Some(pos) = score_pos.filter(|&p| p > 0 && p + 1 < tokens.len()) else {
        log::warn!(
            "Malformed penalty string '{}' for match {}; assuming team1 won",
            penalties,
            m.id
        );
        return m.team1.clone();
    };

    let identity_a = tokens[..pos].join(" ");
    let identity_b = tokens[pos + 1..].join(" ");
    let (s1, s2) = parse_score(tokens[pos]).unwrap_or((0, 0));

    // Shootouts always produce a winner; an equal score here is malformed
    // data and falls into the team1 default below.
    let (winning_identity, fallback) = if s2 > s1 {
        (identity_b, m.team2.clone())
    } else {
        (identity_a, m.team1.clone())
    };

    resolve_identity(&winning_identity, m, reference).unwrap_or_else(|| {
        log::warn!(
            "Shootout identity '{}' matches neither side of {}; assuming {}",
            winning_identity,
            m.id,
            fallback
        );
        fallback
    })
}

/// Match a shootout identity token against either side's key or display name.
fn resolve_identity(identity: &str, m: &MatchRecord, reference: &ReferenceData) -> Option<TeamKey> {
    for key in [&m.team1, &m.team2] {
        if key == identity || reference.team_name(key) == identity {
            return Some(key.clone());
        }
    }
    None
}

/// Tally a score from goal events up to (and including) a minute cutoff.
/// Own goals count for the opposing side. Used for match playback and for
/// cross-checking the embedded schedule.
pub fn score_from_events(
    team1: &str,
    team2: &str,
    events: &[GoalEvent],
    up_to_minute: u32,
) -> (u32, u32) {
    let mut s1 = 0;
    let mut s2 = 0;
    for goal in events {
        let Some(minute) = parse_minute(&goal.minute) else {
            continue;
        };
        if minute > up_to_minute {
            continue;
        }
        let for_team1 = if goal.is_own_goal() {
            goal.team == team2
        } else {
            goal.team == team1
        };
        if for_team1 {
            s1 += 1;
        } else if goal.team == team1 || goal.team == team2 {
            s2 += 1;
        }
    }
    (s1, s2)
}
