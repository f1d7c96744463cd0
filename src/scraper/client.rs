//! HTTP fetcher for the source site.
//!
//! A plain GET with a browser-like identity; the site rejects clients
//! without a plausible User-Agent. The timeout is bounded and there are no
//! retries here. Retry policy belongs to the caller.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};

use crate::error::FetchError;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
     AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

/// HTTP client for fetching the conditions page.
#[derive(Debug, Clone)]
pub struct PageClient {
    client: reqwest::Client,
}

impl PageClient {
    pub fn new(timeout: Duration) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.9"));

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(5))
            .user_agent(BROWSER_USER_AGENT)
            .default_headers(headers)
            .build()
            .unwrap_or_default();

        Self { client }
    }

    /// Fetch the page body. Non-success statuses are fetch failures; so is
    /// any transport error (refused connection, DNS, timeout).
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| FetchError::Transport {
            url: url.to_string(),
            source: e,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    #[test]
    fn test_client_creation() {
        let client = PageClient::new(Duration::from_secs(10));
        let _ = client;
    }

    #[tokio::test]
    async fn test_timeout_is_a_transport_error() {
        // Listener that accepts but never answers.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let client = PageClient::new(Duration::from_millis(200));
        let err = client.fetch(&format!("http://{addr}/")).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        server.abort();
    }

    #[tokio::test]
    async fn test_non_success_status_is_a_fetch_error() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let _ = socket.read(&mut buf).await;
            let _ = socket
                .write_all(
                    b"HTTP/1.1 503 Service Unavailable\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
                )
                .await;
        });

        let client = PageClient::new(Duration::from_secs(2));
        let err = client.fetch(&format!("http://{addr}/")).await.unwrap_err();
        match err {
            FetchError::Status { status, .. } => assert_eq!(status, 503),
            other => panic!("expected status error, got {other}"),
        }
        server.abort();
    }
}
