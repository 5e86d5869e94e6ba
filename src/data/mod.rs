//! Embedded 1994 World Cup reference data: teams and squads (CSV), the full
//! historical match schedule (JSON), and the static tables the engine needs
//! (group definitions, game rounds, formation requirements, Round-of-16 slot
//! definitions). All of it is immutable once loaded.

use crate::models::{
    FormationRules, GameRound, MatchRecord, Player, QualifierSlot, Team, TeamKey,
};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};

const SQUADS_CSV: &str = include_str!("../../data/squads.csv");
const MATCHES_JSON: &str = include_str!("../../data/matches.json");

/// Historical semifinal ids; the third-place playoff and final are hardwired
/// to these rather than discovered by backward search.
pub const SEMI_FINAL_1: &str = "M49";
pub const SEMI_FINAL_2: &str = "M50";
pub const THIRD_PLACE: &str = "M51";
pub const FINAL: &str = "M52";

/// Errors raised while loading or cross-checking the embedded data.
/// The web binary fails fast on any of these at startup.
#[derive(Clone, Debug)]
pub enum DataError {
    Csv(String),
    Json(String),
    UnknownTeam { context: String, team: TeamKey },
    UnknownMatch { round: String, match_id: String },
    DuplicateJersey { team: TeamKey, number: u8 },
}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::Csv(e) => write!(f, "Squad CSV error: {}", e),
            DataError::Json(e) => write!(f, "Match schedule JSON error: {}", e),
            DataError::UnknownTeam { context, team } => {
                write!(f, "Unknown team '{}' referenced by {}", team, context)
            }
            DataError::UnknownMatch { round, match_id } => {
                write!(f, "Round '{}' references unknown match '{}'", round, match_id)
            }
            DataError::DuplicateJersey { team, number } => {
                write!(f, "Duplicate jersey number {} in squad '{}'", number, team)
            }
        }
    }
}

impl std::error::Error for DataError {}

impl From<csv::Error> for DataError {
    fn from(e: csv::Error) -> Self {
        DataError::Csv(e.to_string())
    }
}

impl From<serde_json::Error> for DataError {
    fn from(e: serde_json::Error) -> Self {
        DataError::Json(e.to_string())
    }
}

/// One row of the embedded squad roster file.
#[derive(Debug, Deserialize)]
struct SquadRow {
    team_key: String,
    team_name: String,
    number: u8,
    name: String,
    position: String,
}

/// Immutable reference data store. Read-only to all other components.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    teams: BTreeMap<TeamKey, Team>,
    /// Full schedule, sorted by id (M01..M52).
    matches: Vec<MatchRecord>,
    match_index: HashMap<String, usize>,
    groups: Vec<(String, Vec<TeamKey>)>,
    rounds: Vec<GameRound>,
    formations: BTreeMap<String, FormationRules>,
}

impl ReferenceData {
    /// Parse and cross-check the embedded squad and schedule data.
    pub fn load_embedded() -> Result<Self, DataError> {
        let teams = parse_squads(SQUADS_CSV)?;
        let mut matches: Vec<MatchRecord> = serde_json::from_str(MATCHES_JSON)?;
        matches.sort_by(|a, b| a.id.cmp(&b.id));

        let match_index: HashMap<String, usize> = matches
            .iter()
            .enumerate()
            .map(|(i, m)| (m.id.clone(), i))
            .collect();

        for m in &matches {
            for key in [&m.team1, &m.team2] {
                if !teams.contains_key(key) {
                    return Err(DataError::UnknownTeam {
                        context: format!("match {}", m.id),
                        team: key.clone(),
                    });
                }
            }
        }

        let rounds = game_rounds();
        for round in &rounds {
            for id in &round.match_ids {
                if !match_index.contains_key(id) {
                    return Err(DataError::UnknownMatch {
                        round: round.name.clone(),
                        match_id: id.clone(),
                    });
                }
            }
        }

        let groups = group_definitions();
        for (group, keys) in &groups {
            for key in keys {
                if !teams.contains_key(key) {
                    return Err(DataError::UnknownTeam {
                        context: format!("group {}", group),
                        team: key.clone(),
                    });
                }
            }
        }

        Ok(Self {
            teams,
            matches,
            match_index,
            groups,
            rounds,
            formations: formation_rules(),
        })
    }

    pub fn team(&self, key: &str) -> Option<&Team> {
        self.teams.get(key)
    }

    /// Display name for a key, falling back to the key itself.
    pub fn team_name(&self, key: &str) -> String {
        self.teams
            .get(key)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| key.to_string())
    }

    pub fn teams(&self) -> impl Iterator<Item = &Team> {
        self.teams.values()
    }

    pub fn match_by_id(&self, id: &str) -> Option<&MatchRecord> {
        self.match_index.get(id).map(|&i| &self.matches[i])
    }

    pub fn matches(&self) -> &[MatchRecord] {
        &self.matches
    }

    /// Groups A..F in definition order with their member team keys.
    pub fn groups(&self) -> &[(String, Vec<TeamKey>)] {
        &self.groups
    }

    /// The group a team belongs to, if any.
    pub fn group_of(&self, team_key: &str) -> Option<&str> {
        self.groups
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| k == team_key))
            .map(|(g, _)| g.as_str())
    }

    pub fn rounds(&self) -> &[GameRound] {
        &self.rounds
    }

    pub fn formations(&self) -> &BTreeMap<String, FormationRules> {
        &self.formations
    }

    pub fn formation(&self, key: &str) -> Option<&FormationRules> {
        self.formations.get(key)
    }

    /// All matches of a round, in the round's fixture order.
    pub fn matches_for_round(&self, round_index: usize) -> Vec<&MatchRecord> {
        let Some(round) = self.rounds.get(round_index) else {
            return Vec::new();
        };
        round
            .match_ids
            .iter()
            .filter_map(|id| self.match_by_id(id))
            .collect()
    }

    /// The fixture involving a team in a round, if any.
    pub fn user_match_for_round(
        &self,
        round_index: usize,
        team_key: &str,
    ) -> Option<&MatchRecord> {
        self.matches_for_round(round_index)
            .into_iter()
            .find(|m| m.involves(team_key))
    }
}

fn parse_squads(raw: &str) -> Result<BTreeMap<TeamKey, Team>, DataError> {
    let mut teams: BTreeMap<TeamKey, Team> = BTreeMap::new();
    let mut reader = csv::Reader::from_reader(raw.as_bytes());
    for row in reader.deserialize() {
        let row: SquadRow = row?;
        let team = teams.entry(row.team_key.clone()).or_insert_with(|| Team {
            key: row.team_key.clone(),
            name: row.team_name.clone(),
            squad: Vec::new(),
        });
        if team.squad.iter().any(|p| p.number == row.number) {
            return Err(DataError::DuplicateJersey {
                team: row.team_key,
                number: row.number,
            });
        }
        team.squad.push(Player::new(row.number, row.name, row.position));
    }
    Ok(teams)
}

/// Group membership, 6 groups of 4, in bracket order.
fn group_definitions() -> Vec<(String, Vec<TeamKey>)> {
    let defs: [(&str, [&str; 4]); 6] = [
        ("A", ["USA", "SUI", "COL", "ROU"]),
        ("B", ["BRA", "RUS", "CMR", "SWE"]),
        ("C", ["GER", "BOL", "ESP", "KOR"]),
        ("D", ["ARG", "GRE", "NGA", "BUL"]),
        ("E", ["ITA", "IRL", "NOR", "MEX"]),
        ("F", ["BEL", "MAR", "NED", "KSA"]),
    ];
    defs.iter()
        .map(|(g, keys)| {
            (
                g.to_string(),
                keys.iter().map(|k| k.to_string()).collect(),
            )
        })
        .collect()
}

/// The fixed progression sequence: three group rounds, then the knockouts.
fn game_rounds() -> Vec<GameRound> {
    fn ids(range: std::ops::RangeInclusive<u32>) -> Vec<String> {
        range.map(|n| format!("M{:02}", n)).collect()
    }
    vec![
        GameRound {
            name: "Group Stage - Round 1".to_string(),
            match_ids: ids(1..=12),
            is_group_stage: true,
        },
        GameRound {
            name: "Group Stage - Round 2".to_string(),
            match_ids: ids(13..=24),
            is_group_stage: true,
        },
        GameRound {
            name: "Group Stage - Round 3".to_string(),
            match_ids: ids(25..=36),
            is_group_stage: true,
        },
        GameRound {
            name: "Round of 16".to_string(),
            match_ids: ids(37..=44),
            is_group_stage: false,
        },
        GameRound {
            name: "Quarter-finals".to_string(),
            match_ids: ids(45..=48),
            is_group_stage: false,
        },
        GameRound {
            name: "Semi-finals".to_string(),
            match_ids: ids(49..=50),
            is_group_stage: false,
        },
        GameRound {
            name: "Finals".to_string(),
            match_ids: ids(51..=52),
            is_group_stage: false,
        },
    ]
}

fn formation_rules() -> BTreeMap<String, FormationRules> {
    let defs: [(&str, FormationRules); 5] = [
        ("4-4-2", FormationRules { gk: 1, df: 4, mf: 4, fw: 2 }),
        ("4-3-3", FormationRules { gk: 1, df: 4, mf: 3, fw: 3 }),
        ("3-5-2", FormationRules { gk: 1, df: 3, mf: 5, fw: 2 }),
        ("5-3-2", FormationRules { gk: 1, df: 5, mf: 3, fw: 2 }),
        ("4-5-1", FormationRules { gk: 1, df: 4, mf: 5, fw: 1 }),
    ];
    defs.iter().map(|(k, r)| (k.to_string(), *r)).collect()
}

/// Which generic qualification slot each side of the eight Round-of-16
/// fixtures represents. This is irreducible reference data: the 1994 seeding
/// cannot be derived from the schedule alone.
pub fn ro16_slot_definitions() -> &'static [(&'static str, QualifierSlot, QualifierSlot)] {
    use QualifierSlot::{BestThird, GroupRunnerUp, GroupWinner};
    &[
        ("M37", GroupWinner('C'), BestThird('F')),
        ("M38", GroupRunnerUp('C'), GroupRunnerUp('A')),
        ("M39", GroupRunnerUp('B'), GroupRunnerUp('F')),
        ("M40", GroupWinner('A'), BestThird('D')),
        ("M41", GroupWinner('F'), GroupRunnerUp('E')),
        ("M42", GroupWinner('B'), BestThird('A')),
        ("M43", GroupWinner('D'), BestThird('E')),
        ("M44", GroupWinner('E'), GroupRunnerUp('D')),
    ]
}
