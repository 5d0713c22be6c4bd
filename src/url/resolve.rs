use url::Url;

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - javascript:, mailto:, tel: schemes
/// - data: URIs
/// - fragment-only anchors
/// - Invalid URLs
/// - Non-HTTP(S) URLs after resolution
///
/// # Example
///
/// ```
/// use sitescrape::url::resolve_link;
/// use url::Url;
///
/// let base = Url::parse("https://books.toscrape.com/catalogue/").unwrap();
/// let url = resolve_link("a-light-in-the-attic_1000/index.html", &base).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://books.toscrape.com/catalogue/a-light-in-the-attic_1000/index.html"
/// );
/// ```
pub fn resolve_link(href: &str, base_url: &Url) -> Option<Url> {
    let href = href.trim();

    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    match base_url.join(href) {
        Ok(absolute_url) if matches!(absolute_url.scheme(), "http" | "https") => {
            Some(absolute_url)
        }
        _ => None,
    }
}
