//! Request and response types for the REST API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format::{OutputFormat, Rendered};

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

/// Envelope for successful API responses. `data` is either a structured
/// value (json format) or a display string (text/summary formats).
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub format: String,
    pub data: Value,
}

impl ApiResponse {
    pub fn new(format: OutputFormat, rendered: Rendered) -> Self {
        Self {
            success: true,
            format: format.as_str().to_string(),
            data: rendered.into_value(),
        }
    }
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

/// Query parameters for format selection.
#[derive(Debug, Default, Deserialize)]
pub struct FormatQuery {
    #[serde(default)]
    pub format: OutputFormat,
}

/// Query parameters for the active-conditions filter.
#[derive(Debug, Default, Deserialize)]
pub struct ActiveQuery {
    #[serde(default)]
    pub major_only: bool,
    #[serde(default)]
    pub format: OutputFormat,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_response_wraps_text_as_string() {
        let resp = ApiResponse::new(OutputFormat::Summary, Rendered::Text("2/6".to_string()));
        assert!(resp.success);
        assert_eq!(resp.format, "summary");
        assert_eq!(resp.data, Value::String("2/6".to_string()));
    }

    #[test]
    fn test_format_query_defaults_to_json() {
        let q: FormatQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(q.format, OutputFormat::Json);
    }

    #[test]
    fn test_active_query_parses_flags() {
        let q: ActiveQuery =
            serde_json::from_str(r#"{"major_only": true, "format": "summary"}"#).unwrap();
        assert!(q.major_only);
        assert_eq!(q.format, OutputFormat::Summary);
    }
}
