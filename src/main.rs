//! ARC Raiders Map Conditions
//!
//! Scrapes the live map condition state from arc-raiders.dev and serves it
//! through a CLI and a REST API.

mod cli;
mod config;
mod error;
mod format;
mod maps;
mod retry;
mod routes;
mod scraper;
mod snapshot;
mod store;
mod types;

use axum::{routing::get, Router};
use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::retry::RetryPolicy;
use crate::routes::AppState;
use crate::scraper::Scraper;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => run_server(Some(host), Some(port)).await,
        Commands::Scrape { format, output } => cli::run_scrape(format, output).await,
        Commands::Map { name, format } => cli::run_map(name, format).await,
        Commands::Active { major_only, format } => cli::run_active(major_only, format).await,
        Commands::Upcoming { format } => cli::run_upcoming(format).await,
    }
}

/// Run the API server.
async fn run_server(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arc_conditions=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = AppConfig::load()?;

    // Override with CLI args
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("Source URL: {}", config.scraper.source_url);

    // Create application state
    let state = Arc::new(AppState {
        scraper: Scraper::new(&config.scraper),
        retry: RetryPolicy::network(),
    });

    // Build router. The active/upcoming routes are registered before the
    // map-name capture so they are not swallowed by it.
    let app = Router::new()
        .route("/health", get(routes::health))
        .route("/api/v1/conditions", get(routes::conditions))
        .route("/api/v1/conditions/active", get(routes::active))
        .route("/api/v1/conditions/upcoming", get(routes::upcoming))
        .route("/api/v1/conditions/:map", get(routes::map_condition))
        .route("/api/v1/docs", get(routes::docs))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
