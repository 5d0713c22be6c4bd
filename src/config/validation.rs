use crate::config::types::{BooksConfig, Config, GamesConfig, HttpConfig, SitemapConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_books_config(&config.books)?;
    validate_sitemap_config(&config.sitemap)?;
    validate_games_config(&config.games)?;
    Ok(())
}

fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "connect_timeout_secs must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_books_config(config: &BooksConfig) -> Result<(), ConfigError> {
    validate_http_url("books.base_url", &config.base_url)?;

    // Listing pages are appended as `page-N.html`, so the base must be a directory
    if !config.base_url.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "books.base_url must end with '/', got '{}'",
            config.base_url
        )));
    }

    validate_output("books.output", &config.output)
}

fn validate_sitemap_config(config: &SitemapConfig) -> Result<(), ConfigError> {
    if let Some(domain) = &config.domain {
        if domain.trim().is_empty() {
            return Err(ConfigError::Validation(
                "sitemap.domain cannot be empty".to_string(),
            ));
        }
    }

    if config.max_depth < 1 {
        return Err(ConfigError::Validation(format!(
            "sitemap.max_depth must be >= 1, got {}",
            config.max_depth
        )));
    }

    if config.max_sitemaps < 1 {
        return Err(ConfigError::Validation(format!(
            "sitemap.max_sitemaps must be >= 1, got {}",
            config.max_sitemaps
        )));
    }

    validate_output("sitemap.output", &config.output)
}

fn validate_games_config(config: &GamesConfig) -> Result<(), ConfigError> {
    validate_http_url("games.base_url", &config.base_url)?;

    if config.season_type.trim().is_empty() {
        return Err(ConfigError::Validation(
            "games.season_type cannot be empty".to_string(),
        ));
    }

    validate_output("games.output", &config.output)
}

/// Validates that a value parses as an absolute http(s) URL
fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {}: {}", field, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} must use http or https, got '{}'",
            field,
            url.scheme()
        )));
    }

    Ok(())
}

fn validate_output(field: &str, path: &str) -> Result<(), ConfigError> {
    if path.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{} cannot be empty", field)));
    }
    Ok(())
}
