//! HTML parser for parsing pages and extracting links
//!
//! This module handles turning a fetched body into a queryable document and
//! enumerating the hyperlinks on it.

use crate::url::resolve_link;
use scraper::{Html, Selector};
use url::Url;

/// Parses a decoded page body as an HTML document
///
/// HTML parsing itself is permissive and repairs any markup. A body is only
/// rejected when there is no document to parse: it is blank, or it holds NUL
/// characters, which no HTML page does but binary payloads served as text do.
///
/// # Returns
///
/// * `Ok(Html)` - The parsed document
/// * `Err(String)` - The body is not an HTML document
///
/// # Example
///
/// ```
/// use recipe_crawler::crawler::parse_document;
/// use scraper::Selector;
///
/// let document = parse_document("<html><body><h1>Soup</h1></body></html>").unwrap();
/// let h1 = Selector::parse("h1").unwrap();
/// assert_eq!(document.select(&h1).count(), 1);
/// assert!(parse_document("   ").is_err());
/// ```
pub fn parse_document(body: &str) -> Result<Html, String> {
    if body.trim().is_empty() {
        return Err("page body is empty".to_string());
    }
    if body.contains('\0') {
        return Err("page body is binary, not HTML".to_string());
    }

    Ok(Html::parse_document(body))
}

/// Extracts every hyperlink on the page as an absolute URL
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` tags anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links and data URIs
/// - Fragment-only anchors
///
/// Relative links are resolved against `base_url` and fragments are dropped.
/// Duplicates are kept; deduplication belongs to the visited set.
pub fn extract_links(document: &Html, base_url: &Url) -> Vec<Url> {
    let mut links = Vec::new();

    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if element.value().attr("download").is_some() {
                continue;
            }

            if let Some(absolute_url) = element
                .value()
                .attr("href")
                .and_then(|href| resolve_link(href, base_url))
            {
                links.push(absolute_url);
            }
        }
    }

    links
}
