//! Catalogue listing pages: product links

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Anchor inside each product tile on a listing page
const PRODUCT_LINK: &str = "article.product_pod h3 a";

/// Extracts absolute product-page URLs from a listing page
///
/// Links are resolved against `base_url` (the catalogue directory) and
/// returned in document order. A page without product tiles yields an empty
/// list.
pub fn extract_product_links(html: &str, base_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse(PRODUCT_LINK) {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, base_url) {
                    links.push(absolute_url);
                }
            }
        }
    }

    links
}
