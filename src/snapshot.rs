//! Snapshot data model, status classification and record assembly.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::maps::MapName;
use crate::scraper::parsers::conditions::{ConditionFields, TimeInfo};

/// Classification of a map's record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// A current condition is active on the map.
    Available,
    /// The map is on the page but shows no active condition.
    NoCondition,
    /// The map has no section on the page (not yet available in-game).
    Unavailable,
}

/// One map's condition state at capture time.
///
/// Optional fields serialize as absent keys, never as nulls, so
/// presence/absence survives a round trip through JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapConditionRecord {
    pub name: MapName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_condition: Option<String>,
    #[serde(default)]
    pub is_major: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_condition: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_time: Option<String>,
    pub status: Status,
}

impl MapConditionRecord {
    /// Classify extracted fields (or their absence) into a record.
    ///
    /// Rules, in order: no section on the page, or an explicit
    /// "Map not available" notice, means `unavailable` with every optional
    /// field cleared. A section without a current condition label means
    /// `no_condition`; next-condition fields survive that branch since a
    /// map can have a known upcoming condition without an active one.
    /// Otherwise the map is `available`, and only then is the major marker
    /// honored.
    pub fn classify(name: MapName, fields: Option<ConditionFields>) -> Self {
        match fields {
            None => Self::unavailable(name),
            Some(f) if f.not_available => Self::unavailable(name),
            Some(f) => match f.current_condition {
                None => Self {
                    name,
                    current_condition: None,
                    is_major: false,
                    next_condition: f.next_condition,
                    next_time: f.next_time,
                    status: Status::NoCondition,
                },
                Some(current) => Self {
                    name,
                    current_condition: Some(current),
                    is_major: f.is_major,
                    next_condition: f.next_condition,
                    next_time: f.next_time,
                    status: Status::Available,
                },
            },
        }
    }

    fn unavailable(name: MapName) -> Self {
        Self {
            name,
            current_condition: None,
            is_major: false,
            next_condition: None,
            next_time: None,
            status: Status::Unavailable,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == Status::Available
    }
}

/// Upcoming condition for one map, as returned by the upcoming query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpcomingEntry {
    pub name: MapName,
    pub next_condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_time: Option<String>,
}

/// Immutable result of one fetch-and-extract cycle.
///
/// Records are ordered by the tracked map set, not by document order, and
/// `total_maps` always equals the size of the tracked set regardless of
/// how many maps the page actually showed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub captured_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    pub maps: Vec<MapConditionRecord>,
    pub total_maps: usize,
}

impl Snapshot {
    /// Assemble the envelope from per-map extraction results. Maps with no
    /// extraction result default to `unavailable`.
    pub fn assemble(
        mut fields: HashMap<MapName, ConditionFields>,
        time: TimeInfo,
        captured_at: DateTime<Utc>,
    ) -> Self {
        let maps: Vec<MapConditionRecord> = MapName::ALL
            .iter()
            .map(|&name| MapConditionRecord::classify(name, fields.remove(&name)))
            .collect();

        Self {
            captured_at,
            current_time: time.current_time,
            timezone: time.timezone,
            total_maps: maps.len(),
            maps,
        }
    }

    /// Look up the record for a tracked map.
    pub fn record(&self, name: MapName) -> Option<&MapConditionRecord> {
        self.maps.iter().find(|r| r.name == name)
    }

    /// Records with an active condition, in tracked-set order. With
    /// `major_only`, only those whose current condition is major.
    pub fn active(&self, major_only: bool) -> Vec<&MapConditionRecord> {
        self.maps
            .iter()
            .filter(|r| r.is_active() && (!major_only || r.is_major))
            .collect()
    }

    /// Upcoming conditions for every map that announces one.
    pub fn upcoming(&self) -> Vec<UpcomingEntry> {
        self.maps
            .iter()
            .filter_map(|r| {
                r.next_condition.as_ref().map(|next| UpcomingEntry {
                    name: r.name,
                    next_condition: next.clone(),
                    next_time: r.next_time.clone(),
                })
            })
            .collect()
    }

    pub fn active_count(&self) -> usize {
        self.maps.iter().filter(|r| r.is_active()).count()
    }

    pub fn major_count(&self) -> usize {
        self.maps.iter().filter(|r| r.is_active() && r.is_major).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(current: Option<&str>, major: bool, next: Option<(&str, &str)>) -> ConditionFields {
        ConditionFields {
            current_condition: current.map(str::to_string),
            is_major: major,
            next_condition: next.map(|(c, _)| c.to_string()),
            next_time: next.map(|(_, t)| t.to_string()),
            not_available: false,
        }
    }

    fn sample_snapshot() -> Snapshot {
        let mut extracted = HashMap::new();
        extracted.insert(
            MapName::DamBattlegrounds,
            fields(Some("HIDDEN CACHES"), false, Some(("NIGHT RAID", "8:00 PM"))),
        );
        extracted.insert(
            MapName::TheSpaceport,
            fields(Some("HIDDEN BUNKER"), true, None),
        );
        extracted.insert(MapName::PracticeRange, fields(None, false, None));
        extracted.insert(
            MapName::BuriedCity,
            fields(None, false, Some(("FOG BANK", "2:30 AM"))),
        );
        // The Blue Gate and Stella Montis have no section at all.
        Snapshot::assemble(
            extracted,
            TimeInfo {
                current_time: Some("3:45:12 PM".to_string()),
                timezone: Some("America/New_York".to_string()),
            },
            Utc::now(),
        )
    }

    #[test]
    fn test_total_maps_always_six() {
        let empty = Snapshot::assemble(HashMap::new(), TimeInfo::default(), Utc::now());
        assert_eq!(empty.total_maps, 6);
        assert_eq!(empty.maps.len(), 6);
        assert!(empty.maps.iter().all(|r| r.status == Status::Unavailable));

        let snap = sample_snapshot();
        assert_eq!(snap.total_maps, 6);
    }

    #[test]
    fn test_records_follow_tracked_order() {
        let snap = sample_snapshot();
        let order: Vec<MapName> = snap.maps.iter().map(|r| r.name).collect();
        assert_eq!(order, MapName::ALL.to_vec());
    }

    #[test]
    fn test_available_record() {
        let snap = sample_snapshot();
        let dam = snap.record(MapName::DamBattlegrounds).unwrap();
        assert_eq!(dam.status, Status::Available);
        assert_eq!(dam.current_condition.as_deref(), Some("HIDDEN CACHES"));
        assert!(!dam.is_major);
        assert_eq!(dam.next_condition.as_deref(), Some("NIGHT RAID"));
        assert_eq!(dam.next_time.as_deref(), Some("8:00 PM"));
    }

    #[test]
    fn test_unavailable_clears_all_fields() {
        let snap = sample_snapshot();
        let stella = snap.record(MapName::StellaMontis).unwrap();
        assert_eq!(stella.status, Status::Unavailable);
        assert!(stella.current_condition.is_none());
        assert!(!stella.is_major);
        assert!(stella.next_condition.is_none());
        assert!(stella.next_time.is_none());
    }

    #[test]
    fn test_not_available_notice_clears_fields() {
        let f = ConditionFields {
            next_condition: Some("NIGHT RAID".to_string()),
            next_time: Some("8:00 PM".to_string()),
            not_available: true,
            ..Default::default()
        };
        let record = MapConditionRecord::classify(MapName::TheBlueGate, Some(f));
        assert_eq!(record.status, Status::Unavailable);
        assert!(record.next_condition.is_none());
        assert!(record.next_time.is_none());
    }

    #[test]
    fn test_no_condition_keeps_next_fields() {
        let snap = sample_snapshot();
        let buried = snap.record(MapName::BuriedCity).unwrap();
        assert_eq!(buried.status, Status::NoCondition);
        assert!(buried.current_condition.is_none());
        assert_eq!(buried.next_condition.as_deref(), Some("FOG BANK"));
    }

    #[test]
    fn test_major_requires_current_condition() {
        // A stray major marker without a current condition must not set
        // is_major on the record.
        let f = fields(None, true, None);
        let record = MapConditionRecord::classify(MapName::PracticeRange, Some(f));
        assert_eq!(record.status, Status::NoCondition);
        assert!(!record.is_major);
    }

    #[test]
    fn test_active_filter_order_and_subset() {
        let snap = sample_snapshot();
        let active = snap.active(false);
        let names: Vec<MapName> = active.iter().map(|r| r.name).collect();
        assert_eq!(names, vec![MapName::DamBattlegrounds, MapName::TheSpaceport]);

        let major = snap.active(true);
        assert_eq!(major.len(), 1);
        assert_eq!(major[0].name, MapName::TheSpaceport);
        // Major-only output is always a subset of the unfiltered output.
        assert!(major.iter().all(|r| active.contains(r)));
    }

    #[test]
    fn test_summary_counts() {
        let snap = sample_snapshot();
        assert_eq!(snap.active_count(), 2);
        assert_eq!(snap.major_count(), 1);
        assert!(snap.major_count() <= snap.active_count());
    }

    #[test]
    fn test_upcoming_entries() {
        let snap = sample_snapshot();
        let upcoming = snap.upcoming();
        assert_eq!(upcoming.len(), 2);
        assert_eq!(upcoming[0].name, MapName::DamBattlegrounds);
        assert_eq!(upcoming[0].next_condition, "NIGHT RAID");
        assert_eq!(upcoming[1].name, MapName::BuriedCity);
        assert_eq!(upcoming[1].next_time.as_deref(), Some("2:30 AM"));
    }

    #[test]
    fn test_json_round_trip_preserves_absence() {
        let snap = sample_snapshot();
        let json = serde_json::to_string(&snap).unwrap();
        let back: Snapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, snap);

        // Absent fields must be missing keys, not nulls.
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let stella = &value["maps"][5];
        assert_eq!(stella["name"], "Stella Montis");
        assert!(stella.get("current_condition").is_none());
        assert!(stella.get("next_time").is_none());
    }
}
