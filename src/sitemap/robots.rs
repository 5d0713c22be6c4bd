//! robots.txt `Sitemap:` discovery

/// Prefix of a sitemap directive; matched case-sensitively at line start
const SITEMAP_DIRECTIVE: &str = "Sitemap:";

/// Sitemap roots announced by a robots.txt file
///
/// Only `Sitemap:` lines are read; every other directive is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRobots {
    sitemaps: Vec<String>,
}

impl ParsedRobots {
    /// Parses raw robots.txt content
    ///
    /// Values are trimmed (including a trailing `\r`), empty values are
    /// dropped and a URL listed twice is kept once, at its first position.
    ///
    /// # Example
    ///
    /// ```
    /// use sitescrape::sitemap::ParsedRobots;
    ///
    /// let robots = ParsedRobots::from_content("User-agent: *\nSitemap: https://example.com/sitemap.xml\n");
    /// assert_eq!(robots.sitemaps(), ["https://example.com/sitemap.xml"]);
    /// ```
    pub fn from_content(content: &str) -> Self {
        let mut sitemaps: Vec<String> = Vec::new();

        for line in content.lines() {
            let Some(value) = line.strip_prefix(SITEMAP_DIRECTIVE) else {
                continue;
            };

            let value = value.trim();
            if value.is_empty() || sitemaps.iter().any(|s| s == value) {
                continue;
            }
            sitemaps.push(value.to_string());
        }

        Self { sitemaps }
    }

    /// Sitemap URLs in file order
    pub fn sitemaps(&self) -> &[String] {
        &self.sitemaps
    }

    /// Consumes the parsed file, returning its sitemap URLs
    pub fn into_sitemaps(self) -> Vec<String> {
        self.sitemaps
    }
}
