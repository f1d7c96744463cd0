//! Snapshot file output.
//!
//! Writes the structured snapshot to disk for external tooling. The core
//! scrape cycle never persists anything itself; this is only used when the
//! caller asks for a file.

use std::path::PathBuf;

use anyhow::Result;

use crate::snapshot::Snapshot;

/// Writes snapshots as pretty-printed JSON, absent fields omitted.
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn write(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(snapshot)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::parsers::conditions::{ConditionFields, TimeInfo};
    use crate::maps::MapName;
    use chrono::Utc;
    use std::collections::HashMap;

    #[test]
    fn test_write_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conditions").join("latest.json");

        let mut extracted = HashMap::new();
        extracted.insert(
            MapName::DamBattlegrounds,
            ConditionFields {
                current_condition: Some("HIDDEN CACHES".to_string()),
                ..Default::default()
            },
        );
        let snapshot = Snapshot::assemble(extracted, TimeInfo::default(), Utc::now());

        SnapshotStore::new(path.clone()).write(&snapshot).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let reloaded: Snapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(reloaded, snapshot);

        // The persisted document keeps absent fields as absent keys.
        assert!(!content.contains("null"));
        assert!(content.contains("\"total_maps\": 6"));
    }
}
