//! Web scraper module for arc-raiders.dev
//!
//! Fetches the conditions page, extracts per-map condition fields and
//! assembles them into an immutable snapshot. One invocation is one full
//! fetch-and-extract cycle; nothing is cached or shared between cycles, so
//! concurrent use reduces to the HTTP client's own task-safety.

pub mod client;
pub mod parsers;

use std::time::Duration;

use chrono::Utc;

use crate::config::ScraperConfig;
use crate::error::ScrapeError;
use crate::format::{self, OutputFormat, Rendered};
use crate::maps::MapName;
use crate::snapshot::Snapshot;
use client::PageClient;
use parsers::ConditionsParser;

/// Live map conditions source.
pub const SOURCE_URL: &str = "https://arc-raiders.dev";

/// Scraper facade: owns the HTTP client and exposes the query operations
/// consumed by the CLI and the REST adapter.
#[derive(Debug, Clone)]
pub struct Scraper {
    client: PageClient,
    url: String,
}

impl Scraper {
    pub fn new(config: &ScraperConfig) -> Self {
        Self {
            client: PageClient::new(Duration::from_secs(config.timeout_secs)),
            url: config.source_url.clone(),
        }
    }

    /// One full fetch-and-extract cycle. Either a complete envelope comes
    /// back or the cycle fails; there is no partial result and no stale
    /// substitute.
    pub async fn snapshot(&self) -> Result<Snapshot, ScrapeError> {
        tracing::debug!("fetching map conditions from {}", self.url);
        let html = self.client.fetch(&self.url).await?;
        let (sections, time_info) = ConditionsParser::parse(&html)?;
        let snapshot = Snapshot::assemble(sections, time_info, Utc::now());
        tracing::debug!(
            "assembled snapshot: {}/{} maps active",
            snapshot.active_count(),
            snapshot.total_maps
        );
        Ok(snapshot)
    }

    /// All map conditions in the requested format.
    pub async fn get_snapshot(&self, format: OutputFormat) -> Result<Rendered, ScrapeError> {
        let snapshot = self.snapshot().await?;
        Ok(format::render_snapshot(&snapshot, format))
    }

    /// The record for a single map. Unknown names are rejected before any
    /// fetch happens.
    pub async fn get_map(&self, name: &str, format: OutputFormat) -> Result<Rendered, ScrapeError> {
        let map = MapName::resolve(name)?;
        let snapshot = self.snapshot().await?;
        let record = snapshot
            .record(map)
            .ok_or_else(|| ScrapeError::UnknownMap(name.to_string()))?;
        Ok(format::render_record(record, format))
    }

    /// Maps with an active condition, optionally major-only.
    pub async fn get_active(
        &self,
        major_only: bool,
        format: OutputFormat,
    ) -> Result<Rendered, ScrapeError> {
        let snapshot = self.snapshot().await?;
        Ok(format::render_active(
            &snapshot.active(major_only),
            major_only,
            format,
        ))
    }

    /// Upcoming conditions for every map that announces one.
    pub async fn get_upcoming(&self, format: OutputFormat) -> Result<Rendered, ScrapeError> {
        let snapshot = self.snapshot().await?;
        Ok(format::render_upcoming(&snapshot.upcoming(), format))
    }
}
