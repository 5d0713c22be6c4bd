//! Sitemap XML: `<loc>` values

use crate::url::resolve_link;
use quick_xml::events::Event;
use quick_xml::Reader;
use url::Url;

/// Extracts every `<loc>` text value from a sitemap or sitemap index
///
/// Namespaces are ignored (`<sm:loc>` counts) and nothing else in the
/// document is read. If the XML is malformed, the values read before the
/// error are returned.
pub fn extract_locs(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut locs = Vec::new();
    let mut current: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.local_name().as_ref() == b"loc" => {
                current = Some(String::new());
            }
            Ok(Event::End(e)) if e.local_name().as_ref() == b"loc" => {
                if let Some(loc) = current.take() {
                    let loc = loc.trim();
                    if !loc.is_empty() {
                        locs.push(loc.to_string());
                    }
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(loc) = current.as_mut() {
                    match t.unescape() {
                        Ok(text) => loc.push_str(&text),
                        Err(_) => loc.push_str(&String::from_utf8_lossy(&t)),
                    }
                }
            }
            Ok(Event::CData(t)) => {
                if let Some(loc) = current.as_mut() {
                    loc.push_str(&String::from_utf8_lossy(&t));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::warn!(
                    "Malformed sitemap XML at byte {}: {} (kept {} entries)",
                    reader.buffer_position(),
                    e,
                    locs.len()
                );
                break;
            }
            _ => {}
        }
    }

    locs
}

/// Makes `<loc>` values absolute against the sitemap's own URL
///
/// Values that cannot be resolved to an http(s) URL are dropped.
pub fn resolve_locs(locs: Vec<String>, sitemap_url: &Url) -> Vec<String> {
    locs.into_iter()
        .filter_map(|loc| match resolve_link(&loc, sitemap_url) {
            Some(url) => Some(url.to_string()),
            None => {
                tracing::debug!("Dropping unusable <loc> '{}' in {}", loc, sitemap_url);
                None
            }
        })
        .collect()
}
