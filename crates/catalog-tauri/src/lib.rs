//! Catalog Scraper Tauri Integration
//!
//! This crate provides Tauri commands for integrating a catalog provider
//! into Tauri 2.0 applications.
//!
//! # Usage
//!
//! ```rust,ignore
//! use catalog_tauri::ProviderState;
//! use tauri::Manager;
//!
//! fn main() {
//!     tauri::Builder::default()
//!         .setup(|app| {
//!             app.manage(ProviderState::new()?);
//!             Ok(())
//!         })
//!         .invoke_handler(tauri::generate_handler![
//!             catalog_tauri::commands::get_main_page,
//!             catalog_tauri::commands::list_catalog,
//!             catalog_tauri::commands::search_catalog,
//!             catalog_tauri::commands::load_detail,
//!             catalog_tauri::commands::load_links,
//!         ])
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! # Commands
//! - `get_main_page` - Sections of the main-page menu
//! - `list_catalog` - One page of a section listing
//! - `search_catalog` - Search by title
//! - `load_detail` - Detail record with cast and episodes
//! - `load_links` - Stream links of a detail page

pub mod commands;

use std::sync::Arc;

use catalog_core::{CatalogProvider, CatalogScraper, SiteAdapter};

/// Shared provider handed to every command.
///
/// Providers hold no mutable state, so commands share one instance without
/// a lock.
pub struct ProviderState {
    provider: Arc<dyn CatalogProvider>,
}

impl ProviderState {
    /// Create state backed by the bundled FaselHD scraper.
    ///
    /// # Errors
    /// Returns an error string if the scraper cannot be created.
    pub fn new() -> Result<Self, String> {
        let scraper = CatalogScraper::new().map_err(|e| e.to_string())?;
        Ok(Self::with_provider(Arc::new(scraper)))
    }

    /// Create state backed by a scraper for a JSON site adapter.
    ///
    /// # Errors
    /// Returns an error string if the JSON or its selectors are invalid.
    pub fn from_site_json(json: &str) -> Result<Self, String> {
        let adapter = SiteAdapter::from_json(json).map_err(|e| e.to_string())?;
        let scraper = CatalogScraper::with_site(adapter).map_err(|e| e.to_string())?;
        Ok(Self::with_provider(Arc::new(scraper)))
    }

    /// Create state around any provider implementation.
    pub fn with_provider(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    /// Get a reference to the inner provider.
    pub fn provider(&self) -> &Arc<dyn CatalogProvider> {
        &self.provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_default_provider() {
        let state = ProviderState::new().unwrap();
        assert_eq!(state.provider().name(), "FaselHD");
        assert_eq!(state.provider().lang(), "ar");
        assert_eq!(state.provider().main_page().len(), 3);
    }

    #[test]
    fn test_state_from_site_json() {
        let state = ProviderState::from_site_json(
            r#"{"name": "Mirror", "base_url": "https://mirror.example"}"#,
        )
        .unwrap();
        assert_eq!(state.provider().name(), "Mirror");
        assert_eq!(
            state.provider().main_page()[0].url,
            "https://mirror.example/movies/"
        );
    }

    #[test]
    fn test_state_from_bad_json() {
        let err = ProviderState::from_site_json("{").err().unwrap();
        assert!(err.starts_with("Invalid configuration"));
    }
}
