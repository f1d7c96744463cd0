//! Error kinds for the scrape cycle.
//!
//! Only three things can fail a cycle: the fetch, parsing the document
//! into text at all, or the caller naming a map outside the tracked set.
//! Missing map sections and missing condition fields are data states, not
//! errors.

use thiserror::Error;

/// Network-level fetch failure.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection refused, DNS failure, timeout -- anything below HTTP.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// The site answered with a non-success status.
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
}

/// Top-level error for a fetch-and-extract cycle.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// The response body could not be treated as a document at all.
    #[error("parse failed: {0}")]
    Parse(String),

    /// Requested map is not in the tracked set. Rejected before any fetch.
    #[error("unknown map: {0:?}")]
    UnknownMap(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_display() {
        let err = FetchError::Status {
            url: "https://arc-raiders.dev".to_string(),
            status: 503,
        };
        assert_eq!(err.to_string(), "https://arc-raiders.dev returned HTTP 503");
    }

    #[test]
    fn test_unknown_map_display() {
        let err = ScrapeError::UnknownMap("Atlantis".to_string());
        assert!(err.to_string().contains("Atlantis"));
    }
}
