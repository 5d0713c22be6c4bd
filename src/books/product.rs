//! Product pages: one book record per page
//!
//! Every field is looked up independently. A missing element never aborts
//! extraction; it substitutes that field's sentinel instead, so a page with
//! none of the expected markup still yields a full five-field record.

use crate::output::{IntoRecord, Record};
use indexmap::IndexMap;
use scraper::{ElementRef, Html, Selector};
use url::Url;

pub const NO_TITLE: &str = "No Title";
pub const NO_IMAGE: &str = "No Image";
pub const NO_PRICE: &str = "No Price";
pub const NO_RATING: &str = "No Rating";
pub const NO_DESCRIPTION: &str = "No Description";

/// Names of the fixed columns, in export order
pub const FIXED_FIELDS: [&str; 5] = ["title", "image_url", "price", "rating", "description"];

const RATING_CLASS: &str = "star-rating";

/// A scraped book
///
/// The five fixed fields are always present. `details` holds the rows of the
/// product information table (UPC, tax, availability, ...), whose keys vary
/// from book to book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub title: String,
    pub image_url: String,
    pub price: String,
    pub rating: String,
    pub description: String,
    pub details: IndexMap<String, String>,
}

impl BookRecord {
    /// Looks up a fixed field or a detail row by column name
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "title" => Some(&self.title),
            "image_url" => Some(&self.image_url),
            "price" => Some(&self.price),
            "rating" => Some(&self.rating),
            "description" => Some(&self.description),
            _ => self.details.get(key).map(String::as_str),
        }
    }

    /// Flattens into a row: fixed fields first, then details
    pub fn to_record(&self) -> Record {
        let mut record = Record::with_capacity(FIXED_FIELDS.len() + self.details.len());
        record.insert("title".to_string(), self.title.clone());
        record.insert("image_url".to_string(), self.image_url.clone());
        record.insert("price".to_string(), self.price.clone());
        record.insert("rating".to_string(), self.rating.clone());
        record.insert("description".to_string(), self.description.clone());
        for (key, value) in &self.details {
            record.insert(key.clone(), value.clone());
        }
        record
    }
}

impl IntoRecord for BookRecord {
    fn into_record(self) -> Record {
        self.to_record()
    }
}

impl IntoRecord for &BookRecord {
    fn into_record(self) -> Record {
        self.to_record()
    }
}

/// Extracts a book record from a product page
///
/// Relative image sources are resolved against `page_url`.
pub fn extract_product(html: &str, page_url: &Url) -> BookRecord {
    let document = Html::parse_document(html);

    BookRecord {
        title: extract_title(&document).unwrap_or_else(|| NO_TITLE.to_string()),
        image_url: extract_image_url(&document, page_url).unwrap_or_else(|| NO_IMAGE.to_string()),
        price: extract_price(&document).unwrap_or_else(|| NO_PRICE.to_string()),
        rating: extract_rating(&document).unwrap_or_else(|| NO_RATING.to_string()),
        description: extract_description(&document)
            .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        details: extract_details(&document),
    }
}

fn select_first<'a>(document: &'a Html, selector: &str) -> Option<ElementRef<'a>> {
    let selector = Selector::parse(selector).ok()?;
    document.select(&selector).next()
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn extract_title(document: &Html) -> Option<String> {
    select_first(document, "h1").map(element_text)
}

fn extract_image_url(document: &Html, page_url: &Url) -> Option<String> {
    let src = select_first(document, "img")?.value().attr("src")?.trim();

    Some(
        page_url
            .join(src)
            .map(|url| url.to_string())
            .unwrap_or_else(|_| src.to_string()),
    )
}

fn extract_price(document: &Html) -> Option<String> {
    select_first(document, "p.price_color").map(element_text)
}

/// Star rating word carried as a class token, e.g. `star-rating Three`
fn extract_rating(document: &Html) -> Option<String> {
    let element = select_first(document, "p.star-rating")?;

    let rating = element
        .value()
        .classes()
        .filter(|class| *class != RATING_CLASS)
        .collect::<Vec<_>>()
        .join(" ");

    let rating = rating.trim();
    (!rating.is_empty()).then(|| rating.to_string())
}

/// First `<p>` sibling following the description anchor
fn extract_description(document: &Html) -> Option<String> {
    let anchor = select_first(document, "div#product_description")?;

    anchor
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sibling| sibling.value().name() == "p")
        .map(element_text)
}

/// Header/data pairs from the product information table
///
/// Rows missing either cell are skipped. Keys that shadow a fixed field are
/// dropped. A repeated key keeps its first position and its last value.
fn extract_details(document: &Html) -> IndexMap<String, String> {
    let mut details = IndexMap::new();

    let Some(table) = select_first(document, "table.table.table-striped") else {
        return details;
    };

    let (Ok(row_sel), Ok(th_sel), Ok(td_sel)) = (
        Selector::parse("tr"),
        Selector::parse("th"),
        Selector::parse("td"),
    ) else {
        return details;
    };

    for row in table.select(&row_sel) {
        let (Some(th), Some(td)) = (row.select(&th_sel).next(), row.select(&td_sel).next()) else {
            continue;
        };

        let key = element_text(th);
        if FIXED_FIELDS.contains(&key.as_str()) {
            tracing::trace!("Ignoring product detail row '{}'", key);
            continue;
        }
        details.insert(key, element_text(td));
    }

    details
}
