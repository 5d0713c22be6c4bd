//! URL handling module for sitescrape
//!
//! This module provides link resolution against a base URL, site-root
//! construction from a bare domain, and the basename / `.xml` checks the
//! sitemap walker keys on.

mod domain;
mod resolve;

// Re-export main functions
pub use domain::{basename, is_sitemap_url, robots_url, site_root};
pub use resolve::resolve_link;
