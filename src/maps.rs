//! The tracked map set.
//!
//! The six supported maps are fixed configuration, not discovered from the
//! page. Snapshot ordering and `total_maps` stay stable across site
//! redesigns because they derive from this enumeration, never from the
//! document.

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// Canonical identifier for a tracked map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MapName {
    #[serde(rename = "Dam Battlegrounds")]
    DamBattlegrounds,
    #[serde(rename = "Buried City")]
    BuriedCity,
    #[serde(rename = "The Spaceport")]
    TheSpaceport,
    #[serde(rename = "The Blue Gate")]
    TheBlueGate,
    #[serde(rename = "Practice Range")]
    PracticeRange,
    #[serde(rename = "Stella Montis")]
    StellaMontis,
}

impl MapName {
    /// All tracked maps in canonical order.
    pub const ALL: [MapName; 6] = [
        MapName::DamBattlegrounds,
        MapName::BuriedCity,
        MapName::TheSpaceport,
        MapName::TheBlueGate,
        MapName::PracticeRange,
        MapName::StellaMontis,
    ];

    /// Display name as the source site shows it.
    pub fn as_str(&self) -> &'static str {
        match self {
            MapName::DamBattlegrounds => "Dam Battlegrounds",
            MapName::BuriedCity => "Buried City",
            MapName::TheSpaceport => "The Spaceport",
            MapName::TheBlueGate => "The Blue Gate",
            MapName::PracticeRange => "Practice Range",
            MapName::StellaMontis => "Stella Montis",
        }
    }

    /// URL-friendly identifier used in REST paths.
    pub fn slug(&self) -> &'static str {
        match self {
            MapName::DamBattlegrounds => "dam-battlegrounds",
            MapName::BuriedCity => "buried-city",
            MapName::TheSpaceport => "the-spaceport",
            MapName::TheBlueGate => "the-blue-gate",
            MapName::PracticeRange => "practice-range",
            MapName::StellaMontis => "stella-montis",
        }
    }

    /// Resolve caller input against the tracked set. Case-insensitive and
    /// tolerant of punctuation and whitespace variance, so "buried-city"
    /// and "Buried  City" both resolve. Unknown names are rejected here,
    /// before any fetch happens.
    pub fn resolve(input: &str) -> Result<MapName, ScrapeError> {
        let wanted = normalize(input);
        MapName::ALL
            .iter()
            .copied()
            .find(|m| normalize(m.as_str()) == wanted)
            .ok_or_else(|| ScrapeError::UnknownMap(input.to_string()))
    }
}

impl std::fmt::Display for MapName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lowercase and keep only letters and digits.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
