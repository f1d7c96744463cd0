//! Map condition parser for arc-raiders.dev.
//!
//! The site renders each map's condition block as loosely structured
//! markup with no stable schema, so the document is flattened to text and
//! each map's section is sliced out between its own name and the next
//! tracked map name. Every field inside a section may be independently
//! absent; a missing section or field is a data state, never a parse
//! failure.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use scraper::Html;

use crate::error::ScrapeError;
use crate::maps::MapName;

/// Fields extracted from one map's section. Any subset may be absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConditionFields {
    pub current_condition: Option<String>,
    /// A "MAJOR CONDITION" badge was present in the section. Only honored
    /// by classification when a current condition was also extracted.
    pub is_major: bool,
    pub next_condition: Option<String>,
    pub next_time: Option<String>,
    /// The section carries an explicit "Map not available" notice.
    pub not_available: bool,
}

/// Page-level time display, independent of any map block. Both fields are
/// optional on their own; a page without them still yields a snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeInfo {
    pub current_time: Option<String>,
    pub timezone: Option<String>,
}

/// Parser for the map conditions page.
pub struct ConditionsParser;

impl ConditionsParser {
    /// Extract per-map condition fields and the page time display.
    ///
    /// Maps without a section are simply absent from the result; the
    /// assembler turns those into `unavailable` records. Only a body with
    /// no content at all is a parse failure.
    pub fn parse(
        html: &str,
    ) -> Result<(HashMap<MapName, ConditionFields>, TimeInfo), ScrapeError> {
        if html.trim().is_empty() {
            return Err(ScrapeError::Parse("response body is empty".to_string()));
        }

        let text = Self::page_text(html);

        let mut sections = HashMap::new();
        for &map in MapName::ALL.iter() {
            if let Some(section) = Self::locate_section(&text, map) {
                sections.insert(map, Self::extract_fields(&section));
            }
        }

        Ok((sections, Self::resolve_time(&text)))
    }

    /// Flatten the document to a single text string. The site serves its
    /// map blocks as one run of text, so field matching operates on this.
    fn page_text(html: &str) -> String {
        let document = Html::parse_document(html);
        let parts: Vec<&str> = document.root_element().text().collect();
        parts.join(" ")
    }

    /// Slice out the section of page text belonging to `map`.
    ///
    /// A section runs from the map's name to the next tracked map name,
    /// the page footer ("Data based on UTC"), or end of text. Returns None
    /// when the map has no section; that is the normal signal that the map
    /// is not yet available, not an error. No fixed sibling order between
    /// sections is assumed.
    fn locate_section(page_text: &str, map: MapName) -> Option<String> {
        let boundaries: Vec<String> = MapName::ALL
            .iter()
            .filter(|m| **m != map)
            .map(|m| regex::escape(m.as_str()))
            .collect();

        let pattern = format!(
            r"{}\s*(.*?)(?:{}|Data based on UTC|$)",
            regex::escape(map.as_str()),
            boundaries.join("|"),
        );
        let re = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .unwrap();

        re.captures(page_text).map(|caps| caps[1].trim().to_string())
    }

    /// Pull the condition fields out of one section's text.
    fn extract_fields(section: &str) -> ConditionFields {
        let mut fields = ConditionFields::default();

        // First CURRENT label wins when a block repeats itself.
        let current_re = RegexBuilder::new(
            r"CURRENT\s+([A-Z\s]+?)(?:\s+MAJOR CONDITION|\s+Next Condition|\s*$)",
        )
        .case_insensitive(true)
        .build()
        .unwrap();
        if let Some(caps) = current_re.captures(section) {
            let label = collapse_whitespace(caps[1].trim());
            if !label.is_empty() {
                fields.current_condition = Some(label);
            }
        }

        fields.is_major = contains_ci(section, "MAJOR CONDITION");

        // Preferred shape is "Next Condition <LABEL> <H:MM AM/PM>"; a label
        // without an announced time is still kept, with next_time unset.
        let next_re =
            RegexBuilder::new(r"Next Condition\s+([A-Z\s]+?)\s+(\d{1,2}:\d{2}\s+[AP]M)")
                .case_insensitive(true)
                .build()
                .unwrap();
        if let Some(caps) = next_re.captures(section) {
            fields.next_condition = Some(collapse_whitespace(caps[1].trim()));
            fields.next_time = Some(caps[2].trim().to_string());
        } else {
            let bare_re = RegexBuilder::new(r"Next Condition\s+([A-Z\s]+?)\s*$")
                .case_insensitive(true)
                .build()
                .unwrap();
            if let Some(caps) = bare_re.captures(section) {
                let label = collapse_whitespace(caps[1].trim());
                if !label.is_empty() {
                    fields.next_condition = Some(label);
                }
            }
        }

        fields.not_available = contains_ci(section, "Map not available");

        fields
    }

    /// Find the page's displayed clock and timezone label, anywhere outside
    /// the per-map matching. Either may be missing without failing.
    fn resolve_time(page_text: &str) -> TimeInfo {
        let time_re = Regex::new(r"\d{1,2}:\d{2}:\d{2}\s*[AP]M").unwrap();
        let tz_re = Regex::new(r"America/[A-Za-z_/]+|UTC|GMT").unwrap();

        TimeInfo {
            current_time: time_re.find(page_text).map(|m| m.as_str().to_string()),
            timezone: tz_re.find(page_text).map(|m| m.as_str().to_string()),
        }
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
