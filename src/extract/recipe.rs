//! Recipe-page extractor
//!
//! Pulls name, photo, ingredients, star rating, review count, cook time and
//! serving count out of a recipe detail page.

use crate::extract::{element_text, select_all, Extractor};
use crate::ExtractionError;
use scraper::{ElementRef, Html};
use serde::{Deserialize, Serialize};
use url::Url;

const NAME: &str = "h1";
const PHOTO: &str = "div.recipe-details-image > img";
const INGREDIENTS: &str = "div.recipe-ingredients li";
const HALF_STAR: &str = "#reviews span.half-star";
const FULL_STAR: &str = "a.recipe-details-rating span.full-star";
const REVIEWS: &str = "#reviews span";
const COOK_TIME: &str = "div.recipe-summary-item.unit span";
const SERVINGS: &str = "div.servings input";

const MAX_STARS: f64 = 5.0;

/// One extracted recipe, serialized as a single JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub recipe_name: String,
    pub recipe_photo: String,
    pub ingredients: Vec<String>,
    /// 0.0 to 5.0 in half-star steps
    pub ratings: f64,
    pub reviews: u64,
    pub cook_time: String,
    pub serve: u32,
}

/// Extractor for recipe detail pages
#[derive(Debug, Clone, Copy, Default)]
pub struct RecipeExtractor;

impl RecipeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Extractor for RecipeExtractor {
    type Record = Recipe;

    fn extract(&self, _url: &Url, document: &Html) -> Result<Recipe, ExtractionError> {
        let recipe_name = select_all(document, NAME)?
            .first()
            .map(|h1| element_text(h1).trim().to_string())
            .ok_or(ExtractionError::MissingField {
                field: "recipeName",
            })?;

        let recipe_photo = select_all(document, PHOTO)?
            .first()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string)
            .ok_or(ExtractionError::MissingField {
                field: "recipePhoto",
            })?;

        let ingredients = select_all(document, INGREDIENTS)?
            .iter()
            .map(ingredient_line)
            .collect();

        let ratings = extract_ratings(document)?;
        let reviews = extract_reviews(document)?;

        let cook_time = clean_text(
            &select_all(document, COOK_TIME)?
                .iter()
                .map(element_text)
                .collect::<Vec<_>>()
                .join(" "),
        );

        let serve = extract_servings(document)?;

        Ok(Recipe {
            recipe_name,
            recipe_photo,
            ingredients,
            ratings,
            reviews,
            cook_time,
            serve,
        })
    }
}

/// Joins the text of an ingredient's direct `<span>` children
fn ingredient_line(li: &ElementRef<'_>) -> String {
    let parts: Vec<String> = li
        .children()
        .filter_map(ElementRef::wrap)
        .filter(|child| child.value().name() == "span")
        .map(|span| element_text(&span))
        .collect();

    clean_text(&parts.join(" "))
}

/// Full stars come from the last filled star; a half star adds 0.5 below five
fn extract_ratings(document: &Html) -> Result<f64, ExtractionError> {
    let half_star = select_all(document, HALF_STAR)?
        .first()
        .and_then(|span| star_number(span))
        .unwrap_or(0.0);

    let full_stars = select_all(document, FULL_STAR)?
        .last()
        .and_then(|span| star_number(span))
        .unwrap_or(0.0);

    let bonus = if full_stars < MAX_STARS && half_star != 0.0 {
        0.5
    } else {
        0.0
    };

    Ok(full_stars + bonus)
}

fn star_number(span: &ElementRef<'_>) -> Option<f64> {
    span.value()
        .attr("data-star-number")
        .and_then(|n| n.trim().parse::<f64>().ok())
}

/// Review count is shown as `(123)`
fn extract_reviews(document: &Html) -> Result<u64, ExtractionError> {
    let raw = select_all(document, REVIEWS)?
        .first()
        .map(element_text)
        .ok_or(ExtractionError::MissingField { field: "reviews" })?;

    let digits = raw.trim().trim_matches(|c| c == '(' || c == ')').trim();
    digits.parse().map_err(|_| ExtractionError::InvalidValue {
        field: "reviews",
        value: raw.clone(),
    })
}

/// Serving count defaults to one when the page has no servings input
fn extract_servings(document: &Html) -> Result<u32, ExtractionError> {
    let Some(value) = select_all(document, SERVINGS)?
        .first()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
    else {
        return Ok(1);
    };

    value
        .trim()
        .parse()
        .map_err(|_| ExtractionError::InvalidValue {
            field: "serve",
            value,
        })
}

fn clean_text(text: &str) -> String {
    text.replace('\u{a0}', " ").trim().to_string()
}
