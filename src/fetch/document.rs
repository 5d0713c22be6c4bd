//! Raw response bodies handed from the fetcher to an extractor

/// Content-type hint for a fetched body
///
/// Informational only: extractors parse whatever they are given, since
/// servers routinely label sitemaps `text/plain` or JSON `text/html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Html,
    Xml,
    Json,
    Text,
}

impl ContentKind {
    /// Classifies a `Content-Type` header value
    pub fn from_content_type(content_type: &str) -> Self {
        let mime = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        if mime == "text/html" || mime == "application/xhtml+xml" {
            Self::Html
        } else if mime.ends_with("/json") || mime.ends_with("+json") {
            Self::Json
        } else if mime.ends_with("/xml") || mime.ends_with("+xml") {
            Self::Xml
        } else {
            Self::Text
        }
    }
}

/// A successfully fetched response body
#[derive(Debug, Clone)]
pub struct Document {
    /// URL that was requested
    pub url: String,
    /// Final URL after redirects
    pub final_url: String,
    /// HTTP status code
    pub status_code: u16,
    /// Content-Type header value (empty if absent)
    pub content_type: String,
    /// Classification of `content_type`
    pub kind: ContentKind,
    /// Response body decoded as text
    pub body: String,
}

impl Document {
    /// True if the body is empty or whitespace only
    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}
