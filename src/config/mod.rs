//! Configuration module for sitescrape
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every section is optional; a missing file section falls back to the defaults
//! documented on each type.
//!
//! # Example
//!
//! ```no_run
//! use sitescrape::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sitescrape.toml")).unwrap();
//! println!("Catalogue pages {}..={}", config.books.start_page, config.books.end_page);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{BooksConfig, Config, GamesConfig, HttpConfig, SitemapConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;

/// Environment variable the binary consults for the stats API token
pub const API_TOKEN_ENV: &str = "COLLEGE_FOOTBALL_DATA_API_TOKEN";
