//! Sitescrape: catalogue, sitemap and stats-API harvesting into tables
//!
//! This crate bundles three small harvesters that share one pipeline:
//! build request URLs, fetch, parse, extract a handful of fields, accumulate
//! rows and export them as CSV.
//!
//! - [`books`] walks paginated catalogue listings and product pages
//! - [`sitemap`] follows `Sitemap:` entries from robots.txt through nested sitemaps
//! - [`games`] queries a season-statistics API over a range of years
//!
//! Per-item failures never abort a run; they are collected in a
//! [`output::ScrapeReport`] next to the records that did succeed.

pub mod books;
pub mod config;
pub mod fetch;
pub mod games;
pub mod output;
pub mod sitemap;
pub mod url;

use thiserror::Error;

/// Main error type for setup and export failures
///
/// Fetch and parse problems on individual pages are not represented here;
/// see [`fetch::FetchFailure`].
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),

    #[error("URL error: {0}")]
    UrlError(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL: {0}")]
    MissingHost(String),
}

/// Result type alias for sitescrape operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use books::{BookRecord, BookScraper};
pub use config::Config;
pub use fetch::{build_http_client, fetch_url, Document, FetchFailure};
pub use games::{GameRecord, GamesClient};
pub use output::{Record, ResultTable, ScrapeReport};
pub use sitemap::{SitemapCrawl, SitemapCrawler, SitemapTable};
