//! Catalogue scraper
//!
//! Walks numbered listing pages, follows every product link found on them and
//! extracts one [`BookRecord`] per product page:
//! - [`generate_urls`] builds the listing-page URLs
//! - [`extract_product_links`] reads product links off a listing page
//! - [`extract_product`] reads the fields of a product page

mod listing;
mod paginate;
mod product;

pub use listing::extract_product_links;
pub use paginate::{generate_urls, PageReference};
pub use product::{
    extract_product, BookRecord, FIXED_FIELDS, NO_DESCRIPTION, NO_IMAGE, NO_PRICE, NO_RATING,
    NO_TITLE,
};

use crate::fetch::{fetch_url, FetchFailure};
use crate::output::{save_csv, ResultTable, ScrapeReport};
use crate::ScrapeError;
use reqwest::Client;
use std::path::Path;
use url::Url;

/// Scraper for one catalogue site
pub struct BookScraper {
    client: Client,
    base_url: Url,
}

impl BookScraper {
    /// Creates a scraper for the catalogue rooted at `base_url`
    ///
    /// `base_url` is the directory holding `page-N.html` listings, e.g.
    /// `https://books.toscrape.com/catalogue/`.
    pub fn new(client: Client, base_url: &str) -> Result<Self, ScrapeError> {
        let base_url = Url::parse(base_url)?;
        Ok(Self { client, base_url })
    }

    /// The catalogue directory URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Listing-page URLs for pages `start..=end`
    pub fn generate_urls(&self, start: u32, end: u32) -> Vec<PageReference> {
        generate_urls(self.base_url.as_str(), start, end)
    }

    /// Fetches a listing page and returns its product-page URLs
    pub async fn scrape_listing_page(&self, url: &str) -> Result<Vec<Url>, FetchFailure> {
        let document = fetch_url(&self.client, url).await?;
        Ok(extract_product_links(&document.body, &self.base_url))
    }

    /// Fetches a product page and extracts its record
    ///
    /// Relative image sources resolve against the page's final URL.
    pub async fn scrape_product_page(&self, url: &str) -> Result<BookRecord, FetchFailure> {
        let document = fetch_url(&self.client, url).await?;
        let page_url = Url::parse(&document.final_url).unwrap_or_else(|_| self.base_url.clone());
        Ok(extract_product(&document.body, &page_url))
    }

    /// Scrapes listing pages `start..=end` and every product they link to
    ///
    /// Pages are processed in order and products in link order, so the
    /// records come out in catalogue order. A failed listing or product page
    /// is recorded and skipped.
    pub async fn scrape_catalogue(&self, start: u32, end: u32) -> ScrapeReport<BookRecord> {
        let mut report = ScrapeReport::new();
        let pages = self.generate_urls(start, end);

        tracing::info!(
            "Scraping {} listing pages from {}",
            pages.len(),
            self.base_url
        );

        for page in &pages {
            let links = match self.scrape_listing_page(&page.url).await {
                Ok(links) => links,
                Err(failure) => {
                    report.failures.push(failure);
                    continue;
                }
            };

            tracing::info!(
                "Listing page {}: {} products",
                page.index.unwrap_or_default(),
                links.len()
            );

            for link in &links {
                let outcome = self.scrape_product_page(link.as_str()).await;
                if let Ok(book) = &outcome {
                    tracing::debug!("Scraped '{}' from {}", book.title, link);
                }
                report.record(outcome);
            }
        }

        tracing::info!(
            "Catalogue scrape finished: {} books, {} failures",
            report.records.len(),
            report.failures.len()
        );

        report
    }

    /// Writes records to a CSV file with a header unioned across all records
    pub fn save_to_csv(&self, records: &[BookRecord], path: &Path) -> Result<(), ScrapeError> {
        let table: ResultTable = records.iter().collect();
        save_csv(&table, path)
    }
}
