//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests, including:
//! - Building the shared HTTP client with user agent and timeouts
//! - GET requests that enforce a success status
//! - Error classification into per-item failures
//!
//! Nothing here retries. A failure is logged once and handed back to the
//! caller, which records it and moves on to the next item.

use crate::config::HttpConfig;
use crate::fetch::document::{ContentKind, Document};
use reqwest::{Client, RequestBuilder};
use std::time::Duration;
use thiserror::Error;

/// Why a single fetch produced no document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// Server answered with a non-success status
    #[error("HTTP {status_code} for {url}")]
    Http { url: String, status_code: u16 },

    /// DNS, connection, TLS or timeout failure
    #[error("network error for {url}: {error}")]
    Network { url: String, error: String },

    /// Headers arrived but the body could not be read or decoded
    #[error("failed to read body of {url}: {error}")]
    Body { url: String, error: String },

    /// Body was read but did not have the expected shape
    #[error("unexpected payload from {url}: {reason}")]
    Payload { url: String, reason: String },
}

impl FetchFailure {
    /// The URL whose fetch failed
    pub fn url(&self) -> &str {
        match self {
            Self::Http { url, .. }
            | Self::Network { url, .. }
            | Self::Body { url, .. }
            | Self::Payload { url, .. } => url,
        }
    }

    /// HTTP status code, when the failure was a status error
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Example
///
/// ```no_run
/// use sitescrape::config::HttpConfig;
/// use sitescrape::fetch::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a plain GET request
///
/// # Returns
///
/// * `Ok(Document)` - 2xx response with its body
/// * `Err(FetchFailure)` - status, network or body failure (already logged)
pub async fn fetch_url(client: &Client, url: &str) -> Result<Document, FetchFailure> {
    fetch_request(client.get(url), url).await
}

/// Sends a prepared request and classifies the outcome
///
/// Callers that need headers or query parameters build the request
/// themselves; `url` is only used to label the result.
pub async fn fetch_request(request: RequestBuilder, url: &str) -> Result<Document, FetchFailure> {
    let response = match request.send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                format!("connection failed: {}", e)
            } else {
                e.to_string()
            };
            tracing::error!("Failed to retrieve {}: {}", url, error);
            return Err(FetchFailure::Network {
                url: url.to_string(),
                error,
            });
        }
    };

    let status = response.status();
    if !status.is_success() {
        tracing::error!("Failed to retrieve {}: HTTP {}", url, status);
        return Err(FetchFailure::Http {
            url: url.to_string(),
            status_code: status.as_u16(),
        });
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    match response.text().await {
        Ok(body) => {
            tracing::debug!("Fetched {} ({} bytes, {})", url, body.len(), content_type);
            Ok(Document {
                url: url.to_string(),
                final_url,
                status_code: status.as_u16(),
                kind: ContentKind::from_content_type(&content_type),
                content_type,
                body,
            })
        }
        Err(e) => {
            tracing::error!("Failed to read body of {}: {}", url, e);
            Err(FetchFailure::Body {
                url: url.to_string(),
                error: e.to_string(),
            })
        }
    }
}
