//! Crawl results keyed by sitemap URL

use crate::output::{save_csv, IntoRecord, Record, ResultTable};
use crate::url::{basename, is_sitemap_url};
use crate::ScrapeError;
use indexmap::IndexMap;
use std::path::Path;

/// Role of a `<loc>` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// Points at another sitemap (path ends in `.xml`)
    Index,
    /// Points at a content page
    Leaf,
}

/// One `<loc>` value read from a sitemap
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapEntry {
    pub url: String,
}

impl SitemapEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn kind(&self) -> EntryKind {
        if is_sitemap_url(&self.url) {
            EntryKind::Index
        } else {
            EntryKind::Leaf
        }
    }
}

/// Entries of one fetched sitemap, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSection {
    /// Full URL of the sitemap
    pub url: String,
    /// Final path segment of `url`
    pub basename: String,
    pub entries: Vec<SitemapEntry>,
}

impl SitemapSection {
    pub fn new(url: impl Into<String>, entries: Vec<SitemapEntry>) -> Self {
        let url = url.into();
        Self {
            basename: basename(&url),
            url,
            entries,
        }
    }

    /// Entries that point at content pages
    pub fn leaves(&self) -> impl Iterator<Item = &SitemapEntry> {
        self.entries.iter().filter(|e| e.kind() == EntryKind::Leaf)
    }
}

/// One row of the flattened table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapRow {
    /// Full URL of the sitemap the entry came from
    pub sitemap: String,
    /// Basename of that sitemap
    pub basename: String,
    /// The content URL
    pub url: String,
}

impl IntoRecord for SitemapRow {
    fn into_record(self) -> Record {
        let mut record = Record::with_capacity(3);
        record.insert("sitemap".to_string(), self.sitemap);
        record.insert("basename".to_string(), self.basename);
        record.insert("url".to_string(), self.url);
        record
    }
}

/// Sections keyed by full sitemap URL, in the order they were completed
///
/// Keying by full URL keeps two sitemaps that share a basename
/// (`/en/sitemap.xml`, `/fr/sitemap.xml`) apart.
#[derive(Debug, Clone, Default)]
pub struct SitemapTable {
    sections: IndexMap<String, SitemapSection>,
}

impl SitemapTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a completed section
    ///
    /// Returns the URL of an earlier section with the same basename, if any.
    /// Both sections are kept.
    pub fn insert(&mut self, section: SitemapSection) -> Option<String> {
        let clash = self
            .sections
            .values()
            .find(|s| s.basename == section.basename && s.url != section.url)
            .map(|s| s.url.clone());

        self.sections.insert(section.url.clone(), section);
        clash
    }

    pub fn get(&self, url: &str) -> Option<&SitemapSection> {
        self.sections.get(url)
    }

    /// All sections whose sitemap has the given basename
    pub fn by_basename<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a SitemapSection> {
        self.sections.values().filter(move |s| s.basename == name)
    }

    pub fn sections(&self) -> impl Iterator<Item = &SitemapSection> {
        self.sections.values()
    }

    /// Number of sitemaps recorded
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Flattens every section's content URLs into one list of rows
    ///
    /// Entries pointing at other sitemaps are not rows; their own sections
    /// contribute the URLs they list.
    pub fn combined(&self) -> Vec<SitemapRow> {
        self.sections
            .values()
            .flat_map(|section| {
                section.leaves().map(move |entry| SitemapRow {
                    sitemap: section.url.clone(),
                    basename: section.basename.clone(),
                    url: entry.url.clone(),
                })
            })
            .collect()
    }

    /// The combined rows as a result table
    pub fn to_table(&self) -> ResultTable {
        ResultTable::from_records(self.combined())
    }

    /// Writes the combined rows to a CSV file
    pub fn save_as_csv(&self, path: &Path) -> Result<(), ScrapeError> {
        save_csv(&self.to_table(), path)
    }
}
