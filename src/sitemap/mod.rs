//! Sitemap crawler
//!
//! Starts from a site's robots.txt, takes every `Sitemap:` URL as a root and
//! walks nested sitemap indexes down to the content URLs they list.
//!
//! # Example
//!
//! ```no_run
//! use sitescrape::config::HttpConfig;
//! use sitescrape::fetch::build_http_client;
//! use sitescrape::sitemap::{CrawlLimits, SitemapCrawler};
//! use std::path::Path;
//!
//! # async fn run() -> sitescrape::Result<()> {
//! let client = build_http_client(&HttpConfig::default())?;
//! let crawler = SitemapCrawler::for_domain(client, "example.com", CrawlLimits::default())?;
//! let crawl = crawler.crawl().await;
//! crawl.table.save_as_csv(Path::new("combined_sitemap.csv"))?;
//! # Ok(())
//! # }
//! ```

mod robots;
mod table;
mod walker;
mod xml;

pub use robots::ParsedRobots;
pub use table::{EntryKind, SitemapEntry, SitemapRow, SitemapSection, SitemapTable};
pub use walker::{
    BasenameCollision, CrawlLimits, SitemapCrawl, SitemapWalker, SkipReason, SkippedSitemap,
};
pub use xml::{extract_locs, resolve_locs};

use crate::fetch::{fetch_url, FetchFailure};
use crate::output::RunSummary;
use crate::url::{robots_url, site_root};
use crate::ScrapeError;
use reqwest::Client;
use url::Url;

/// Sitemap crawler for one site
pub struct SitemapCrawler {
    client: Client,
    root: Url,
    limits: CrawlLimits,
}

impl SitemapCrawler {
    /// Creates a crawler for the site rooted at `root`
    pub fn new(client: Client, root: Url, limits: CrawlLimits) -> Self {
        Self {
            client,
            root,
            limits,
        }
    }

    /// Creates a crawler from a bare domain (`example.com`, served over
    /// HTTPS) or a full site root URL
    pub fn for_domain(
        client: Client,
        domain: &str,
        limits: CrawlLimits,
    ) -> Result<Self, ScrapeError> {
        let root = site_root(domain)?;
        Ok(Self::new(client, root, limits))
    }

    /// Location of the site's robots.txt
    pub fn robots_url(&self) -> Url {
        robots_url(&self.root)
    }

    /// Fetches robots.txt and returns the sitemap roots it announces
    pub async fn discover_roots(&self) -> Result<Vec<String>, FetchFailure> {
        let url = self.robots_url();
        let document = fetch_url(&self.client, url.as_str()).await?;
        if document.is_blank() {
            tracing::info!("{} is empty", url);
            return Ok(Vec::new());
        }
        Ok(ParsedRobots::from_content(&document.body).into_sitemaps())
    }

    /// Crawls every sitemap announced in robots.txt
    ///
    /// An unreachable robots.txt yields an empty crawl with the failure
    /// recorded; a robots.txt without `Sitemap:` lines yields an empty crawl
    /// with no failures.
    pub async fn crawl(&self) -> SitemapCrawl {
        match self.discover_roots().await {
            Ok(roots) => {
                if roots.is_empty() {
                    tracing::info!("No Sitemap: directives in {}", self.robots_url());
                } else {
                    tracing::info!("Found {} sitemap roots in {}", roots.len(), self.robots_url());
                }
                self.crawl_from(&roots).await
            }
            Err(failure) => SitemapCrawl {
                failures: vec![failure],
                ..SitemapCrawl::default()
            },
        }
    }

    /// Crawls from explicit sitemap roots, skipping robots.txt
    pub async fn crawl_from(&self, roots: &[String]) -> SitemapCrawl {
        let mut walker = SitemapWalker::new(&self.client, self.limits);

        for root in roots {
            walker.walk(root).await;
        }

        let fetched = walker.fetched();
        let crawl = walker.finish_crawl();

        tracing::info!(
            "Sitemap crawl finished: {} sitemaps fetched, {} kept, {} failed, {} skipped",
            fetched,
            crawl.table.len(),
            crawl.failures.len(),
            crawl.skipped.len()
        );

        crawl
    }
}

impl SitemapCrawl {
    /// Document counts for the end-of-run printout: sitemaps parsed and
    /// fetches that failed (robots.txt included)
    pub fn summary(&self) -> RunSummary {
        RunSummary {
            records: self.table.len() as u64,
            failures: self.failures.len() as u64,
        }
    }
}
