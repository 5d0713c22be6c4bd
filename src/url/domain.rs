use crate::{UrlError, UrlResult};
use url::Url;

/// Builds the site root URL for a domain
///
/// A bare domain (`example.com`) becomes `https://example.com/`. A value that
/// already carries a scheme (`http://127.0.0.1:8080`) is parsed as-is, which is
/// how mock servers and plain-HTTP hosts are addressed.
///
/// # Examples
///
/// ```
/// use sitescrape::url::site_root;
///
/// assert_eq!(site_root("example.com").unwrap().as_str(), "https://example.com/");
/// assert_eq!(
///     site_root("http://127.0.0.1:8080").unwrap().as_str(),
///     "http://127.0.0.1:8080/"
/// );
/// ```
pub fn site_root(domain: &str) -> UrlResult<Url> {
    let domain = domain.trim().trim_end_matches('/');

    let candidate = if domain.contains("://") {
        domain.to_string()
    } else {
        format!("https://{}", domain)
    };

    let url = Url::parse(&candidate).map_err(|e| UrlError::Parse(format!("{}: {}", domain, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none() {
        return Err(UrlError::MissingHost(domain.to_string()));
    }

    Ok(url)
}

/// Returns the robots.txt location for a site root
pub fn robots_url(root: &Url) -> Url {
    let mut url = root.clone();
    url.set_path("/robots.txt");
    url.set_query(None);
    url.set_fragment(None);
    url
}

/// Returns the final path segment of a URL
///
/// An unparsable URL or a path ending in `/` yields an empty string.
///
/// ```
/// use sitescrape::url::basename;
///
/// assert_eq!(basename("https://example.com/sitemaps/post-sitemap.xml"), "post-sitemap.xml");
/// assert_eq!(basename("https://example.com/"), "");
/// ```
pub fn basename(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.next_back().map(str::to_string))
        })
        .unwrap_or_default()
}

/// Returns true if the URL path names an XML document (a nested sitemap)
///
/// Query string and fragment are ignored, so `sitemap.xml?page=2` counts.
pub fn is_sitemap_url(url: &str) -> bool {
    match Url::parse(url) {
        Ok(parsed) => parsed.path().ends_with(".xml"),
        Err(_) => url
            .split(['?', '#'])
            .next()
            .is_some_and(|path| path.ends_with(".xml")),
    }
}
