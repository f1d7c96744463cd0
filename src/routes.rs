//! API route handlers.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::error::ScrapeError;
use crate::maps::MapName;
use crate::retry::{with_retry, RetryPolicy};
use crate::scraper::Scraper;
use crate::types::{ActiveQuery, ApiResponse, ErrorResponse, FormatQuery, HealthResponse};

/// Application state shared across handlers.
pub struct AppState {
    pub scraper: Scraper,
    /// Retry policy around the scrape cycle. The cycle itself never
    /// retries; this is the adapter's own resilience.
    pub retry: RetryPolicy,
}

/// Error type for API handlers.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_gateway(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: msg.into(),
        }
    }
}

impl From<ScrapeError> for ApiError {
    fn from(err: ScrapeError) -> Self {
        match err {
            ScrapeError::UnknownMap(name) => Self::not_found(format!("Map '{name}' not found")),
            // Upstream fetch/parse trouble is the source site's fault, not
            // the caller's.
            other => Self::bad_gateway(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            error: self.status.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "arc-conditions-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// All map conditions.
pub async fn conditions(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FormatQuery>,
) -> Result<Json<ApiResponse>, ApiError> {
    let rendered = with_retry(&state.retry, "conditions scrape", || {
        state.scraper.get_snapshot(query.format)
    })
    .await?;
    Ok(Json(ApiResponse::new(query.format, rendered)))
}

/// Condition record for a single map.
pub async fn map_condition(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    Query(query): Query<FormatQuery>,
) -> Result<Json<ApiResponse>, ApiError> {
    // Reject unknown names up front so they never trigger a fetch, let
    // alone a retried one.
    let map = MapName::resolve(&name)?;
    let rendered = with_retry(&state.retry, "map scrape", || {
        state.scraper.get_map(map.as_str(), query.format)
    })
    .await?;
    Ok(Json(ApiResponse::new(query.format, rendered)))
}

/// Maps with an active condition.
pub async fn active(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ActiveQuery>,
) -> Result<Json<ApiResponse>, ApiError> {
    let rendered = with_retry(&state.retry, "active scrape", || {
        state.scraper.get_active(query.major_only, query.format)
    })
    .await?;
    Ok(Json(ApiResponse::new(query.format, rendered)))
}

/// Upcoming conditions for all maps.
pub async fn upcoming(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FormatQuery>,
) -> Result<Json<ApiResponse>, ApiError> {
    let rendered = with_retry(&state.retry, "upcoming scrape", || {
        state.scraper.get_upcoming(query.format)
    })
    .await?;
    Ok(Json(ApiResponse::new(query.format, rendered)))
}

/// API documentation.
pub async fn docs() -> Json<Value> {
    Json(json!({
        "service": "ARC Raiders Map Conditions API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "REST API for real-time ARC Raiders map conditions",
        "endpoints": {
            "GET /health": "Health check",
            "GET /api/v1/conditions": "Get all map conditions",
            "GET /api/v1/conditions/{map_name}": "Get specific map condition",
            "GET /api/v1/conditions/active": "Get only active conditions",
            "GET /api/v1/conditions/upcoming": "Get upcoming conditions",
        },
        "maps": MapName::ALL.iter().map(|m| m.slug()).collect::<Vec<_>>(),
        "formats": ["json", "text", "summary"],
        "examples": {
            "all_conditions": "/api/v1/conditions?format=text",
            "specific_map": "/api/v1/conditions/dam-battlegrounds",
            "active_only": "/api/v1/conditions/active?format=summary",
            "major_only": "/api/v1/conditions/active?major_only=true",
            "upcoming": "/api/v1/conditions/upcoming",
        },
    }))
}
