//! Rendering of snapshots into caller-selected representations.
//!
//! Three formats: `json` (structured value, absent fields are absent
//! keys), `text` (the human-readable layout) and `summary` (one line).
//! Everything here is computed from the assembled snapshot, never by
//! re-scanning the document.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::snapshot::{MapConditionRecord, Snapshot, Status, UpcomingEntry};

/// Output format selector shared by the CLI, the REST API and the
/// snapshot boundary functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Structured data.
    #[default]
    #[serde(alias = "structured")]
    Json,
    /// Human-readable display.
    Text,
    /// One-line overview.
    Summary,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Text => "text",
            OutputFormat::Summary => "summary",
        }
    }
}

/// A rendered result: either a structured value or display text.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Structured(Value),
    Text(String),
}

impl Rendered {
    /// Collapse into a JSON value for transport (text becomes a string).
    pub fn into_value(self) -> Value {
        match self {
            Rendered::Structured(v) => v,
            Rendered::Text(t) => Value::String(t),
        }
    }
}

/// Render the full snapshot.
pub fn render_snapshot(snapshot: &Snapshot, format: OutputFormat) -> Rendered {
    match format {
        OutputFormat::Json => {
            Rendered::Structured(serde_json::to_value(snapshot).unwrap_or_default())
        }
        OutputFormat::Text => Rendered::Text(snapshot_text(snapshot)),
        OutputFormat::Summary => Rendered::Text(summary_line(snapshot)),
    }
}

/// Render a single map's record. Summary and text coincide for one map.
pub fn render_record(record: &MapConditionRecord, format: OutputFormat) -> Rendered {
    match format {
        OutputFormat::Json => {
            Rendered::Structured(serde_json::to_value(record).unwrap_or_default())
        }
        OutputFormat::Text | OutputFormat::Summary => Rendered::Text(record_text(record)),
    }
}

/// Render the active-condition filter result.
pub fn render_active(
    records: &[&MapConditionRecord],
    major_only: bool,
    format: OutputFormat,
) -> Rendered {
    let filter_desc = if major_only {
        "major conditions"
    } else {
        "active conditions"
    };

    match format {
        OutputFormat::Json => Rendered::Structured(json!({
            "active_maps": records,
            "total_active": records.len(),
            "filter": if major_only { "major_only" } else { "all_active" },
        })),
        OutputFormat::Summary => {
            let line = if records.is_empty() {
                format!("⚪ No maps currently have {filter_desc}")
            } else {
                format!("🟢 {} maps have {filter_desc}", records.len())
            };
            Rendered::Text(line)
        }
        OutputFormat::Text => {
            if records.is_empty() {
                return Rendered::Text(format!("⚪ No maps currently have {filter_desc}"));
            }
            let mut out = Vec::new();
            let header = if major_only {
                "🔥 MAJOR CONDITIONS"
            } else {
                "🟢 ACTIVE CONDITIONS"
            };
            out.push(format!("{header} ({} maps)", records.len()));
            out.push("=".repeat(50));
            for record in records {
                out.push(format!("🗺️  {}", record.name));
                out.extend(condition_lines(record));
                out.push(String::new());
            }
            Rendered::Text(out.join("\n"))
        }
    }
}

/// Render upcoming conditions.
pub fn render_upcoming(entries: &[UpcomingEntry], format: OutputFormat) -> Rendered {
    match format {
        OutputFormat::Json => Rendered::Structured(json!({
            "upcoming_conditions": entries,
            "total_upcoming": entries.len(),
        })),
        OutputFormat::Text | OutputFormat::Summary => {
            if entries.is_empty() {
                return Rendered::Text("⏳ No upcoming conditions scheduled".to_string());
            }
            let mut out = Vec::new();
            out.push(format!("⏳ UPCOMING CONDITIONS ({} maps)", entries.len()));
            out.push("=".repeat(50));
            for entry in entries {
                let mut info = entry.next_condition.clone();
                if let Some(time) = &entry.next_time {
                    info.push_str(&format!(" at {time}"));
                }
                out.push(format!("🗺️  {}: {info}", entry.name));
            }
            Rendered::Text(out.join("\n"))
        }
    }
}

/// The full human-readable display.
pub fn snapshot_text(snapshot: &Snapshot) -> String {
    let mut out = Vec::new();
    out.push("🎮 ARC RAIDERS MAP CONDITIONS".to_string());
    out.push("=".repeat(50));

    if let Some(time) = &snapshot.current_time {
        out.push(format!("⏰ Current Time: {time}"));
    }
    if let Some(tz) = &snapshot.timezone {
        out.push(format!("🌍 Timezone: {tz}"));
    }
    out.push(format!("📊 Total Maps: {}", snapshot.total_maps));
    out.push(String::new());

    for record in &snapshot.maps {
        out.push(record_text(record));
        out.push(String::new());
    }

    out.push(format!(
        "🕒 Last updated: {}",
        snapshot.captured_at.format("%Y-%m-%d %H:%M:%S")
    ));

    out.join("\n")
}

/// One map's heading plus condition lines.
pub fn record_text(record: &MapConditionRecord) -> String {
    let heading = format!("🗺️  {}", record.name);
    let underline = "-".repeat(heading.chars().count());

    let mut out = vec![heading, underline];
    out.extend(condition_lines(record));
    out.join("\n")
}

/// The one-line overview, computed from the envelope's own counts.
pub fn summary_line(snapshot: &Snapshot) -> String {
    let mut summary = format!(
        "📊 ARC Raiders Status: {}/{} maps have active conditions",
        snapshot.active_count(),
        snapshot.total_maps
    );
    if snapshot.major_count() > 0 {
        summary.push_str(&format!(" ({} major conditions)", snapshot.major_count()));
    }
    summary
}

fn condition_lines(record: &MapConditionRecord) -> Vec<String> {
    let mut lines = Vec::new();

    match record.status {
        Status::Unavailable => {
            lines.push("   ❌ Map not available yet".to_string());
            return lines;
        }
        Status::NoCondition => {
            lines.push("   ⚪ No active condition".to_string());
        }
        Status::Available => {
            if let Some(current) = &record.current_condition {
                let major = if record.is_major { " 🔥 MAJOR" } else { "" };
                lines.push(format!("   🟢 Current: {current}{major}"));
            }
        }
    }

    if let Some(next) = &record.next_condition {
        let mut info = next.clone();
        if let Some(time) = &record.next_time {
            info.push_str(&format!(" at {time}"));
        }
        lines.push(format!("   ⏳ Next: {info}"));
    }

    lines
}
