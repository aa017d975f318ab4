//! Record extraction
//!
//! An [`Extractor`] turns one parsed page into one structured record, or
//! reports which expected piece was missing. The crawler core only depends on
//! this trait; [`RecipeExtractor`] is the built-in recipe-page schema.

mod recipe;

pub use recipe::{Recipe, RecipeExtractor};

use crate::ExtractionError;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Maps a parsed document to a structured record
///
/// Implementations must be shareable across workers. A page that is well
/// formed but is not the kind of page the extractor understands should yield
/// an `ExtractionError`, which the crawler logs and drops.
pub trait Extractor: Send + Sync {
    /// The record type produced for each matching page
    type Record: Send;

    /// Extracts a record from `document`, which was fetched from `url`
    fn extract(&self, url: &Url, document: &Html) -> Result<Self::Record, ExtractionError>;
}

/// Compiles a CSS selector, reporting failures as extraction errors
pub(crate) fn selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::Selector {
        selector: css.to_string(),
        message: format!("{:?}", e),
    })
}

/// Collects all elements of `document` matching `css`
pub(crate) fn select_all<'a>(
    document: &'a Html,
    css: &str,
) -> Result<Vec<ElementRef<'a>>, ExtractionError> {
    let selector = selector(css)?;
    Ok(document.select(&selector).collect())
}

/// Concatenated text content of an element
pub(crate) fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>()
}
