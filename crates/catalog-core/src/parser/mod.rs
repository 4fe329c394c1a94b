//! HTML parsers for catalog pages
//!
//! This module contains parsers for extracting data from site HTML:
//! - `listing`: Parse listing and search pages into catalog cards
//! - `detail`: Parse a title's detail page, including cast and episodes
//! - `links`: Parse the server list of a detail page into stream links
//!
//! Every parser is a pure function of the document and the site adapter.
//! A selector that matches nothing yields an empty or absent value.

pub mod detail;
pub mod links;
pub mod listing;

use scraper::{ElementRef, Selector};

use crate::site::SiteAdapter;

// Re-export main parsing functions
pub use detail::{parse_detail, parse_episode};
pub use links::parse_stream_links;
pub use listing::{parse_card, parse_cards, parse_catalog_page};

/// Text content of an element with whitespace runs collapsed to single spaces.
pub fn element_text(element: &ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Collapsed text of the first descendant matching `selector`, if non-empty.
pub fn select_text(element: &ElementRef, selector: &Selector) -> Option<String> {
    element
        .select(selector)
        .next()
        .map(|el| element_text(&el))
        .filter(|text| !text.is_empty())
}

/// Non-empty attribute of the first descendant matching `selector`.
pub fn select_attr(element: &ElementRef, selector: &Selector, attr: &str) -> Option<String> {
    element
        .select(selector)
        .next()
        .and_then(|el| el.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Absolute image URL of the first descendant matching `selector`.
///
/// Tries the adapter's image attributes in order (e.g. `src` then
/// `data-src`); empty string when no image or no usable attribute exists.
pub fn select_image(element: &ElementRef, selector: &Selector, site: &SiteAdapter) -> String {
    let Some(img) = element.select(selector).next() else {
        return String::new();
    };

    site.image_attrs
        .iter()
        .filter_map(|attr| img.value().attr(attr))
        .map(str::trim)
        .find(|value| !value.is_empty())
        .map(|value| site.resolve_url(value))
        .unwrap_or_default()
}

/// First run of ASCII digits in `text`, parsed.
///
/// ```
/// use catalog_core::parser::first_int;
///
/// assert_eq!(first_int("Episode 12: Finale"), Some(12));
/// assert_eq!(first_int("120 min"), Some(120));
/// assert_eq!(first_int("Special"), None);
/// ```
pub fn first_int(text: &str) -> Option<u32> {
    let re = regex_lite::Regex::new(r"\d+").ok()?;
    re.find(text)?.as_str().parse().ok()
}

/// Rating normalized to 0.0 - 10.0.
///
/// Reads the first decimal number. Values above 10 and up to 100 are taken
/// as percentages.
pub fn parse_rating(text: &str) -> Option<f32> {
    let re = regex_lite::Regex::new(r"\d+(?:[.,]\d+)?").ok()?;
    let raw: f32 = re.find(text)?.as_str().replace(',', ".").parse().ok()?;

    let normalized = if raw > 10.0 && raw <= 100.0 {
        raw / 10.0
    } else {
        raw
    };

    Some(normalized.clamp(0.0, 10.0))
}

/// Four-digit year, `None` unless the whole text is an integer.
pub fn parse_year(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}
