//! HTTP fetching shared by every harvester
//!
//! This module contains:
//! - HTTP client construction from `[http]` configuration
//! - Single GET requests that never raise, returning either a [`Document`]
//!   or a [`FetchFailure`] describing what went wrong

mod document;
mod fetcher;

pub use document::{ContentKind, Document};
pub use fetcher::{build_http_client, fetch_request, fetch_url, FetchFailure};
