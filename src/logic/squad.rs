//! Squad selection validation: starter count, squad membership, and
//! formation category requirements. Blocking user-input validation, not
//! engine failure.

use crate::data::ReferenceData;
use crate::models::{PlayerCategory, SessionError, Team};
use std::collections::HashMap;

pub const STARTERS: usize = 11;
pub const MAX_SUBS: usize = 5;

/// Check a proposed selection against the squad and the chosen formation.
/// The first violation found is returned as the blocking message.
pub fn validate_squad_selection(
    team: &Team,
    starters: &[u8],
    subs: &[u8],
    formation_key: &str,
    reference: &ReferenceData,
) -> Result<(), SessionError> {
    if starters.len() != STARTERS {
        return Err(SessionError::WrongStarterCount {
            needed: STARTERS,
            selected: starters.len(),
        });
    }
    if subs.len() > MAX_SUBS {
        return Err(SessionError::TooManySubs {
            allowed: MAX_SUBS,
            selected: subs.len(),
        });
    }

    let mut seen = Vec::with_capacity(starters.len() + subs.len());
    for &number in starters.iter().chain(subs.iter()) {
        if team.player_by_number(number).is_none() {
            return Err(SessionError::UnknownPlayerNumber(number));
        }
        if seen.contains(&number) {
            return Err(SessionError::DuplicatePlayerNumber(number));
        }
        seen.push(number);
    }

    let rules = reference
        .formation(formation_key)
        .ok_or_else(|| SessionError::UnknownFormation(formation_key.to_string()))?;

    let mut counts: HashMap<PlayerCategory, u8> = HashMap::new();
    for &number in starters {
        // Membership checked above.
        if let Some(player) = team.player_by_number(number) {
            *counts.entry(player.category).or_insert(0) += 1;
        }
    }
    for category in [
        PlayerCategory::Gk,
        PlayerCategory::Df,
        PlayerCategory::Mf,
        PlayerCategory::Fw,
    ] {
        let selected = counts.get(&category).copied().unwrap_or(0);
        let needed = rules.required(category);
        if selected != needed {
            return Err(SessionError::FormationMismatch {
                category,
                needed,
                selected,
            });
        }
    }
    Ok(())
}
