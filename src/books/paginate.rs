//! Listing-page URL generation

/// A page to fetch, with its position in the generated sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReference {
    pub url: String,
    pub index: Option<u32>,
}

/// Generates listing-page URLs `<base>page-<i>.html` for `i` in `start..=end`
///
/// `base` is used verbatim as a prefix, so it should end with `/`.
/// A reversed range (`start > end`) yields no pages.
///
/// # Example
///
/// ```
/// use sitescrape::books::generate_urls;
///
/// let pages = generate_urls("https://books.toscrape.com/catalogue/", 1, 2);
/// assert_eq!(pages[0].url, "https://books.toscrape.com/catalogue/page-1.html");
/// assert_eq!(pages[1].index, Some(2));
/// ```
pub fn generate_urls(base: &str, start: u32, end: u32) -> Vec<PageReference> {
    (start..=end)
        .map(|i| PageReference {
            url: format!("{}page-{}.html", base, i),
            index: Some(i),
        })
        .collect()
}
