//! Tauri commands for the catalog scraper
//!
//! This module contains all Tauri commands that can be invoked from the frontend.

use serde::{Deserialize, Serialize};
use tauri::State;
use tracing::debug;

use crate::ProviderState;
use catalog_core::{
    CatalogEntry, CatalogPage, CatalogProvider, DetailRecord, MainPageSection, StreamLink,
    SubtitleFile,
};

/// Result of [`load_links`]: everything the callbacks delivered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinksResponse {
    /// `true` once the page was fetched, even with zero links
    pub success: bool,
    pub links: Vec<StreamLink>,
    pub subtitles: Vec<SubtitleFile>,
}

/// Get the main-page menu.
#[tauri::command]
pub fn get_main_page(state: State<'_, ProviderState>) -> Vec<MainPageSection> {
    state.provider().main_page()
}

/// Get one page of a section listing.
///
/// # Arguments
/// * `section_url` - URL from the main-page menu
/// * `page` - Page number (1-based)
#[tauri::command]
pub async fn list_catalog(
    state: State<'_, ProviderState>,
    section_url: String,
    page: u32,
) -> Result<CatalogPage, String> {
    state
        .provider()
        .list_catalog(&section_url, page)
        .await
        .map_err(|e| e.to_string())
}

/// Search the catalog by title.
///
/// # Returns
/// * `Ok(Vec<CatalogEntry>)` with matching titles
/// * `Err(String)` with error message if search fails
#[tauri::command]
pub async fn search_catalog(
    state: State<'_, ProviderState>,
    query: String,
) -> Result<Vec<CatalogEntry>, String> {
    state
        .provider()
        .search(&query)
        .await
        .map_err(|e| e.to_string())
}

/// Load the detail record of a title.
#[tauri::command]
pub async fn load_detail(
    state: State<'_, ProviderState>,
    url: String,
) -> Result<DetailRecord, String> {
    state
        .provider()
        .load_detail(&url)
        .await
        .map_err(|e| e.to_string())
}

/// Collect the stream links of a detail page.
#[tauri::command]
pub async fn load_links(
    state: State<'_, ProviderState>,
    url: String,
) -> Result<LinksResponse, String> {
    collect_links(state.provider().as_ref(), &url).await
}

/// Run the callback-style link extraction and gather its output.
pub async fn collect_links(provider: &dyn CatalogProvider, url: &str) -> Result<LinksResponse, String> {
    let mut links = Vec::new();
    let mut subtitles = Vec::new();

    let success = provider
        .extract_stream_links(url, &mut |s| subtitles.push(s), &mut |l| links.push(l))
        .await
        .map_err(|e| e.to_string())?;

    debug!(url, links = links.len(), success, "collected stream links");
    Ok(LinksResponse {
        success,
        links,
        subtitles,
    })
}
