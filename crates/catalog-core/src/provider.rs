//! Provider contract hosts depend on
//!
//! A host (media browser, Tauri frontend, CLI) only sees this trait. The
//! bundled [`CatalogScraper`](crate::CatalogScraper) is one implementation;
//! hosts hold it as `Arc<dyn CatalogProvider>`.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    CatalogEntry, CatalogPage, DetailRecord, MainPageSection, StreamLink, SubtitleFile, TvKind,
};

/// Main page, search, detail and stream link operations of one catalog source
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Provider display name
    fn name(&self) -> &str;

    /// Language tag of the catalog content
    fn lang(&self) -> &str;

    /// Kinds of titles this provider lists
    fn supported_kinds(&self) -> &[TvKind];

    /// Sections shown on the main page
    fn main_page(&self) -> Vec<MainPageSection>;

    /// One page of a section listing (1-based; 0 is treated as 1).
    async fn list_catalog(&self, section_url: &str, page: u32) -> Result<CatalogPage>;

    /// Titles matching `query`, in site order.
    ///
    /// Besides fetch errors, an empty or whitespace-only query fails with
    /// [`CatalogError::EmptyQuery`](crate::CatalogError::EmptyQuery) without
    /// any request being made.
    async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>>;

    /// Full record for a URL taken from a [`CatalogEntry`] or episode.
    async fn load_detail(&self, entry_url: &str) -> Result<DetailRecord>;

    /// Deliver the stream links of a detail page through `on_link`.
    ///
    /// Returns `Ok(true)` once the page was fetched, whether or not any
    /// link was found.
    async fn extract_stream_links(
        &self,
        entry_url: &str,
        on_subtitle: &mut (dyn FnMut(SubtitleFile) + Send),
        on_link: &mut (dyn FnMut(StreamLink) + Send),
    ) -> Result<bool>;
}
