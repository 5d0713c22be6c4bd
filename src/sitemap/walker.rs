//! Sitemap graph traversal
//!
//! The walk is depth-first with an explicit stack instead of recursion. A
//! sitemap's section is stored only after every nested sitemap it lists has
//! been walked, so children precede their parent in the table.
//!
//! Three guards bound the walk:
//! - a URL is fetched at most once per crawl (cycles terminate)
//! - children deeper than `max_depth` below a root are not fetched
//! - no more than `max_sitemaps` documents are fetched in total

use crate::fetch::{fetch_url, FetchFailure};
use crate::sitemap::table::{SitemapEntry, SitemapSection, SitemapTable};
use crate::sitemap::xml::{extract_locs, resolve_locs};
use crate::url::is_sitemap_url;
use reqwest::Client;
use std::collections::HashSet;
use std::fmt;
use url::Url;

/// Bounds applied to one crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLimits {
    /// Deepest nesting level fetched; roots are depth 0
    pub max_depth: u32,
    /// Maximum number of sitemap documents fetched
    pub max_sitemaps: u32,
}

impl Default for CrawlLimits {
    fn default() -> Self {
        Self {
            max_depth: 10,
            max_sitemaps: 1000,
        }
    }
}

/// Why a sitemap URL was not fetched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Already fetched (or attempted) earlier in this crawl
    AlreadyVisited,
    /// Nested deeper than `max_depth`
    DepthExceeded { depth: u32 },
    /// `max_sitemaps` documents have already been fetched
    BudgetExhausted,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyVisited => write!(f, "already visited"),
            Self::DepthExceeded { depth } => write!(f, "depth {} exceeds limit", depth),
            Self::BudgetExhausted => write!(f, "sitemap budget exhausted"),
        }
    }
}

/// A sitemap URL the walk declined to fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedSitemap {
    pub url: String,
    pub reason: SkipReason,
}

/// Two distinct sitemaps sharing a basename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasenameCollision {
    pub basename: String,
    pub first: String,
    pub second: String,
}

/// Everything one crawl produced
#[derive(Debug, Clone, Default)]
pub struct SitemapCrawl {
    /// Sitemap URLs taken from robots.txt (or supplied directly)
    pub roots: Vec<String>,
    pub table: SitemapTable,
    pub failures: Vec<FetchFailure>,
    pub skipped: Vec<SkippedSitemap>,
    pub collisions: Vec<BasenameCollision>,
}

/// A sitemap whose nested entries are still being walked
struct Frame {
    url: String,
    depth: u32,
    locs: Vec<String>,
    cursor: usize,
}

impl Frame {
    /// Next nested sitemap URL not yet handed out
    fn next_child(&mut self) -> Option<String> {
        while let Some(loc) = self.locs.get(self.cursor) {
            self.cursor += 1;
            if is_sitemap_url(loc) {
                return Some(loc.clone());
            }
        }
        None
    }

    fn into_section(self) -> SitemapSection {
        let entries = self.locs.into_iter().map(SitemapEntry::new).collect();
        SitemapSection::new(self.url, entries)
    }
}

/// Walks sitemap graphs, accumulating into one [`SitemapCrawl`]
pub struct SitemapWalker<'a> {
    client: &'a Client,
    limits: CrawlLimits,
    visited: HashSet<String>,
    fetched: u32,
    crawl: SitemapCrawl,
}

impl<'a> SitemapWalker<'a> {
    pub fn new(client: &'a Client, limits: CrawlLimits) -> Self {
        Self {
            client,
            limits,
            visited: HashSet::new(),
            fetched: 0,
            crawl: SitemapCrawl::default(),
        }
    }

    /// Number of sitemap documents requested so far
    pub fn fetched(&self) -> u32 {
        self.fetched
    }

    /// Walks the graph below one root sitemap
    pub async fn walk(&mut self, root: &str) {
        // Same form as resolved children, so the visited set sees one spelling
        let root = Url::parse(root)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| root.to_string());
        self.crawl.roots.push(root.clone());

        if !self.admit(&root, 0) {
            return;
        }
        let Some(frame) = self.open(&root, 0).await else {
            return;
        };

        let mut stack = vec![frame];

        while let Some(top) = stack.last_mut() {
            if let Some(child) = top.next_child() {
                let depth = top.depth + 1;
                if self.admit(&child, depth) {
                    if let Some(frame) = self.open(&child, depth).await {
                        stack.push(frame);
                    }
                }
                continue;
            }

            if let Some(done) = stack.pop() {
                self.finish(done);
            }
        }
    }

    /// Consumes the walker, returning the accumulated crawl
    pub fn finish_crawl(self) -> SitemapCrawl {
        self.crawl
    }

    /// Applies the visited, depth and budget guards; marks the URL visited
    fn admit(&mut self, url: &str, depth: u32) -> bool {
        let reason = if self.visited.contains(url) {
            Some(SkipReason::AlreadyVisited)
        } else if depth > self.limits.max_depth {
            Some(SkipReason::DepthExceeded { depth })
        } else if self.fetched >= self.limits.max_sitemaps {
            Some(SkipReason::BudgetExhausted)
        } else {
            None
        };

        match reason {
            None => {
                self.visited.insert(url.to_string());
                self.fetched += 1;
                true
            }
            Some(reason) => {
                if reason == SkipReason::AlreadyVisited {
                    tracing::debug!("Skipping sitemap {}: {}", url, reason);
                } else {
                    tracing::warn!("Skipping sitemap {}: {}", url, reason);
                }
                self.crawl.skipped.push(SkippedSitemap {
                    url: url.to_string(),
                    reason,
                });
                false
            }
        }
    }

    /// Fetches and parses one sitemap
    async fn open(&mut self, url: &str, depth: u32) -> Option<Frame> {
        match fetch_url(self.client, url).await {
            Ok(document) => {
                let mut locs = extract_locs(&document.body);
                if let Ok(base) = Url::parse(&document.final_url) {
                    locs = resolve_locs(locs, &base);
                }
                tracing::debug!("Sitemap {} (depth {}): {} entries", url, depth, locs.len());
                Some(Frame {
                    url: url.to_string(),
                    depth,
                    locs,
                    cursor: 0,
                })
            }
            Err(failure) => {
                self.crawl.failures.push(failure);
                None
            }
        }
    }

    /// Stores a fully walked sitemap
    fn finish(&mut self, frame: Frame) {
        let section = frame.into_section();
        let url = section.url.clone();
        let name = section.basename.clone();

        tracing::info!("Collected {} entries from {}", section.entries.len(), url);

        if let Some(first) = self.crawl.table.insert(section) {
            tracing::warn!(
                "Sitemaps {} and {} share basename '{}'; both kept under their full URLs",
                first,
                url,
                name
            );
            self.crawl.collisions.push(BasenameCollision {
                basename: name,
                first,
                second: url,
            });
        }
    }
}
