//! Integration tests
//!
//! These tests use wiremock to stand up mock HTTP servers and drive each
//! pipeline end-to-end, from the first request to the exported CSV.

mod export_tests;
mod sitemap_tests;

use sitescrape::config::HttpConfig;
use sitescrape::fetch::build_http_client;

/// HTTP client with short timeouts for talking to a local mock server
pub fn test_client() -> reqwest::Client {
    build_http_client(&HttpConfig {
        user_agent: "sitescrape-tests/1.0".to_string(),
        timeout_secs: 5,
        connect_timeout_secs: 2,
    })
    .expect("Failed to build HTTP client")
}
