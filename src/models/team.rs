//! Team, Player, and formation requirement data structures.

use serde::{Deserialize, Serialize};

/// Stable short code for a national team (e.g. "GER", "BRA").
pub type TeamKey = String;

/// Broad position category derived from a player's position string.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PlayerCategory {
    Gk,
    Df,
    Mf,
    Fw,
    Unknown,
}

impl PlayerCategory {
    /// Map a position string (e.g. "GK", "CB", "AM", "ST") to its category.
    pub fn from_position(position: &str) -> Self {
        match position.trim().to_ascii_uppercase().as_str() {
            "GK" => PlayerCategory::Gk,
            "RB" | "CB" | "LB" | "SW" | "RWB" | "LWB" | "DF" => PlayerCategory::Df,
            "DM" | "CM" | "AM" | "RM" | "LM" | "MF" => PlayerCategory::Mf,
            "RW" | "LW" | "SS" | "CF" | "ST" | "FW" => PlayerCategory::Fw,
            _ => PlayerCategory::Unknown,
        }
    }
}

impl std::fmt::Display for PlayerCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PlayerCategory::Gk => "GK",
            PlayerCategory::Df => "DF",
            PlayerCategory::Mf => "MF",
            PlayerCategory::Fw => "FW",
            PlayerCategory::Unknown => "??",
        };
        write!(f, "{}", s)
    }
}

/// A squad member. Jersey numbers are unique within a squad.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub number: u8,
    pub name: String,
    pub position: String,
    pub category: PlayerCategory,
}

impl Player {
    pub fn new(number: u8, name: impl Into<String>, position: impl Into<String>) -> Self {
        let position = position.into();
        let category = PlayerCategory::from_position(&position);
        Self {
            number,
            name: name.into(),
            position,
            category,
        }
    }
}

/// A national team with its ordered squad. Immutable reference data.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub key: TeamKey,
    pub name: String,
    pub squad: Vec<Player>,
}

impl Team {
    pub fn player_by_number(&self, number: u8) -> Option<&Player> {
        self.squad.iter().find(|p| p.number == number)
    }
}

/// How many starters of each category a formation requires (plus one GK).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct FormationRules {
    pub gk: u8,
    pub df: u8,
    pub mf: u8,
    pub fw: u8,
}

impl FormationRules {
    pub fn required(&self, category: PlayerCategory) -> u8 {
        match category {
            PlayerCategory::Gk => self.gk,
            PlayerCategory::Df => self.df,
            PlayerCategory::Mf => self.mf,
            PlayerCategory::Fw => self.fw,
            PlayerCategory::Unknown => 0,
        }
    }
}
