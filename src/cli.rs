//! CLI commands for arc-conditions.
//!
//! Supports both API server mode and one-shot query modes.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;
use crate::format::{self, OutputFormat, Rendered};
use crate::scraper::Scraper;
use crate::store::SnapshotStore;

#[derive(Parser)]
#[command(name = "arc-conditions")]
#[command(version, about = "Live ARC Raiders map conditions: scraper, CLI and API", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server
    Serve {
        /// Host to bind to
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },

    /// Fetch all map conditions once and print them
    Scrape {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Also write the structured snapshot to this file
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show the condition record for a single map
    Map {
        /// Map name or slug (e.g. "Dam Battlegrounds" or dam-battlegrounds)
        name: String,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show only maps with an active condition
    Active {
        /// Only maps whose current condition is major
        #[arg(long)]
        major_only: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show upcoming conditions and their times
    Upcoming {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

/// Run a one-shot scrape of every map.
pub async fn run_scrape(format: OutputFormat, output: Option<PathBuf>) -> anyhow::Result<()> {
    let scraper = load_scraper()?;

    eprintln!("Fetching ARC Raiders map conditions...");
    let snapshot = scraper.snapshot().await?;

    print_rendered(format::render_snapshot(&snapshot, format))?;

    if let Some(path) = output {
        SnapshotStore::new(path.clone()).write(&snapshot)?;
        eprintln!("💾 Snapshot saved to {}", path.display());
    }

    Ok(())
}

/// Query a single map.
pub async fn run_map(name: String, format: OutputFormat) -> anyhow::Result<()> {
    let scraper = load_scraper()?;
    print_rendered(scraper.get_map(&name, format).await?)
}

/// Query maps with active conditions.
pub async fn run_active(major_only: bool, format: OutputFormat) -> anyhow::Result<()> {
    let scraper = load_scraper()?;
    print_rendered(scraper.get_active(major_only, format).await?)
}

/// Query upcoming conditions.
pub async fn run_upcoming(format: OutputFormat) -> anyhow::Result<()> {
    let scraper = load_scraper()?;
    print_rendered(scraper.get_upcoming(format).await?)
}

fn load_scraper() -> anyhow::Result<Scraper> {
    let config = AppConfig::load()?;
    Ok(Scraper::new(&config.scraper))
}

fn print_rendered(rendered: Rendered) -> anyhow::Result<()> {
    match rendered {
        Rendered::Structured(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Rendered::Text(text) => println!("{text}"),
    }
    Ok(())
}
