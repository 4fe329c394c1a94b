//! Listing parser
//!
//! Turns card nodes (section listings, search results, related titles) into
//! [`CatalogEntry`] values.

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, trace};

use crate::site::CompiledSite;
use crate::types::{CatalogEntry, CatalogPage};

use super::{parse_year, select_attr, select_image, select_text};

/// Parse every card on a listing or search page.
///
/// Cards without a title or link are skipped; the result may be empty.
pub fn parse_cards(html: &str, site: &CompiledSite) -> Vec<CatalogEntry> {
    let document = Html::parse_document(html);
    let items = cards_in(&document.root_element(), &site.selectors().card, site);
    debug!(count = items.len(), "parsed listing cards");
    items
}

/// Parse one page of a section listing, including pagination state.
pub fn parse_catalog_page(
    html: &str,
    site: &CompiledSite,
    section: &str,
    page: u32,
) -> CatalogPage {
    let document = Html::parse_document(html);
    let items = cards_in(&document.root_element(), &site.selectors().card, site);
    let has_next_page = document.select(&site.selectors().next_page).next().is_some();

    debug!(section, page, count = items.len(), has_next_page, "parsed catalog page");
    CatalogPage::new(section, items, page, has_next_page)
}

/// All cards under `root` matching `selector`, malformed ones dropped.
pub(crate) fn cards_in(root: &ElementRef, selector: &Selector, site: &CompiledSite) -> Vec<CatalogEntry> {
    root.select(selector)
        .filter_map(|card| parse_card(&card, site))
        .collect()
}

/// Parse a single card node.
///
/// # Returns
/// `None` if the card has no title text or no link; every other field is
/// optional (`poster_url` becomes an empty string).
pub fn parse_card(element: &ElementRef, site: &CompiledSite) -> Option<CatalogEntry> {
    let selectors = site.selectors();
    let adapter = site.adapter();

    let Some(title) = select_text(element, &selectors.card_title) else {
        trace!("skipping card without title");
        return None;
    };

    let Some(href) = select_attr(element, &selectors.card_link, "href") else {
        trace!(title = %title, "skipping card without link");
        return None;
    };
    let url = adapter.resolve_url(&href);

    let poster_url = select_image(element, &selectors.card_poster, adapter);
    let year = select_text(element, &selectors.card_year).and_then(|text| parse_year(&text));
    let quality = select_text(element, &selectors.card_quality);
    let kind = adapter.classify(&url);

    Some(CatalogEntry {
        title,
        url,
        poster_url,
        year,
        kind,
        quality,
    })
}
