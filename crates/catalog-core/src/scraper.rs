//! Main catalog scraper API
//!
//! This module provides the high-level API for scraping a catalog site.
//! It combines a page fetcher with the parsers: every operation fetches one
//! page and maps it to records. There is no cache and no retry; each call
//! performs a fresh fetch.

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use crate::client::{ClientConfig, HttpFetcher, PageFetcher};
use crate::error::{CatalogError, Result};
use crate::parser::{parse_cards, parse_catalog_page, parse_detail, parse_stream_links};
use crate::provider::CatalogProvider;
use crate::site::{CompiledSite, SiteAdapter};
use crate::types::{
    CatalogEntry, CatalogPage, DetailRecord, MainPageSection, StreamLink, SubtitleFile, TvKind,
};

/// Catalog scraper for one site
///
/// Stateless apart from its configuration, so a single instance can be
/// shared across tasks behind an `Arc` without locking.
///
/// # Example
/// ```no_run
/// use catalog_core::CatalogScraper;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let scraper = CatalogScraper::new()?;
///
///     let results = scraper.search("Dune").await?;
///     println!("Found {} results", results.len());
///
///     Ok(())
/// }
/// ```
pub struct CatalogScraper<F = HttpFetcher> {
    site: CompiledSite,
    fetcher: F,
}

impl CatalogScraper<HttpFetcher> {
    /// Create a scraper for the bundled FaselHD preset.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created.
    ///
    /// # Example
    /// ```
    /// use catalog_core::CatalogScraper;
    ///
    /// let scraper = CatalogScraper::new().expect("Failed to create scraper");
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_site(SiteAdapter::faselhd())
    }

    /// Create a scraper for a custom site adapter.
    ///
    /// # Errors
    /// - `CatalogError::InvalidSelector` if a selector fails to compile
    /// - `CatalogError::Http` if the HTTP client cannot be created
    pub fn with_site(adapter: SiteAdapter) -> Result<Self> {
        Self::with_config(adapter, ClientConfig::default())
    }

    /// Create a scraper with custom site adapter and client configuration.
    pub fn with_config(adapter: SiteAdapter, config: ClientConfig) -> Result<Self> {
        let site = adapter.compile()?;
        let fetcher = HttpFetcher::with_config(config)?;
        Ok(Self::with_fetcher(site, fetcher))
    }
}

impl<F: PageFetcher> CatalogScraper<F> {
    /// Create a scraper on top of any page fetcher.
    ///
    /// This is how hosts supply their own transport, and how tests feed
    /// canned HTML.
    pub fn with_fetcher(site: CompiledSite, fetcher: F) -> Self {
        Self { site, fetcher }
    }

    /// The compiled site adapter in use
    pub fn site(&self) -> &CompiledSite {
        &self.site
    }

    /// Main-page menu of the configured site
    pub fn main_page(&self) -> Vec<MainPageSection> {
        self.site.adapter().main_page()
    }

    /// Fetch one page of a section listing.
    ///
    /// # Arguments
    /// * `section_url` - Section URL from [`main_page`](Self::main_page) (or a path on the site)
    /// * `page` - Page number (1-based, 0 treated as 1)
    ///
    /// # Returns
    /// The cards on that page; cards missing a title or link are left out.
    ///
    /// # Errors
    /// Only fetch errors; an empty or unrecognized page yields an empty list.
    #[instrument(skip(self))]
    pub async fn list_catalog(&self, section_url: &str, page: u32) -> Result<CatalogPage> {
        let page = page.max(1);
        let adapter = self.site.adapter();
        let url = adapter.page_url(section_url, page);

        let html = self.fetcher.fetch(&url).await?;

        let section = adapter.section_label(section_url).unwrap_or(section_url);
        let result = parse_catalog_page(&html, &self.site, section, page);
        info!(url = %url, count = result.items.len(), "listed catalog page");
        Ok(result)
    }

    /// Search the site.
    ///
    /// Results are returned as found: no cap and no deduplication.
    ///
    /// # Errors
    /// - `CatalogError::EmptyQuery` if query is empty or whitespace-only
    /// - fetch errors
    ///
    /// # Example
    /// ```no_run
    /// use catalog_core::CatalogScraper;
    ///
    /// # async fn example() -> Result<(), catalog_core::CatalogError> {
    /// let scraper = CatalogScraper::new()?;
    /// for entry in scraper.search("Breaking Bad").await? {
    ///     println!("{} ({:?}) {}", entry.title, entry.kind, entry.url);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(CatalogError::EmptyQuery);
        }

        let url = self.site.adapter().search_url(trimmed);
        let html = self.fetcher.fetch(&url).await?;

        let items = parse_cards(&html, &self.site);
        info!(url = %url, count = items.len(), "search finished");
        Ok(items)
    }

    /// Load the detail record of a title.
    ///
    /// Movie vs series is decided by the URL path. Missing fields stay
    /// empty; only a failed fetch is an error.
    ///
    /// # Example
    /// ```no_run
    /// use catalog_core::CatalogScraper;
    ///
    /// # async fn example() -> Result<(), catalog_core::CatalogError> {
    /// let scraper = CatalogScraper::new()?;
    /// let detail = scraper.load_detail("https://www.faselhds.care/series/dark").await?;
    /// if let Some(episodes) = &detail.episodes {
    ///     println!("{} has {} episodes", detail.title, episodes.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[instrument(skip(self))]
    pub async fn load_detail(&self, entry_url: &str) -> Result<DetailRecord> {
        let url = self.site.adapter().resolve_url(entry_url);
        let html = self.fetcher.fetch(&url).await?;
        Ok(parse_detail(&html, &url, &self.site))
    }

    /// Fetch a detail page and pass each server entry to `on_link`.
    ///
    /// Links arrive in document order, duplicates included. An entry without
    /// a link attribute is still delivered, with an empty `source_url`. Subtitles are
    /// not scraped, so `_on_subtitle` is never called.
    ///
    /// # Returns
    /// `Ok(true)` whenever the page was fetched, even if it listed no servers.
    #[instrument(skip(self, _on_subtitle, on_link))]
    pub async fn extract_stream_links(
        &self,
        entry_url: &str,
        _on_subtitle: impl FnMut(SubtitleFile),
        mut on_link: impl FnMut(StreamLink),
    ) -> Result<bool> {
        let url = self.site.adapter().resolve_url(entry_url);
        let html = self.fetcher.fetch(&url).await?;

        let links = parse_stream_links(&html, &self.site);
        debug!(url = %url, count = links.len(), "delivering stream links");
        for link in links {
            on_link(link);
        }
        Ok(true)
    }
}

#[async_trait]
impl<F: PageFetcher> CatalogProvider for CatalogScraper<F> {
    fn name(&self) -> &str {
        &self.site.adapter().name
    }

    fn lang(&self) -> &str {
        &self.site.adapter().lang
    }

    fn supported_kinds(&self) -> &[TvKind] {
        &self.site.adapter().supported_kinds
    }

    fn main_page(&self) -> Vec<MainPageSection> {
        CatalogScraper::main_page(self)
    }

    async fn list_catalog(&self, section_url: &str, page: u32) -> Result<CatalogPage> {
        CatalogScraper::list_catalog(self, section_url, page).await
    }

    async fn search(&self, query: &str) -> Result<Vec<CatalogEntry>> {
        CatalogScraper::search(self, query).await
    }

    async fn load_detail(&self, entry_url: &str) -> Result<DetailRecord> {
        CatalogScraper::load_detail(self, entry_url).await
    }

    async fn extract_stream_links(
        &self,
        entry_url: &str,
        on_subtitle: &mut (dyn FnMut(SubtitleFile) + Send),
        on_link: &mut (dyn FnMut(StreamLink) + Send),
    ) -> Result<bool> {
        CatalogScraper::extract_stream_links(self, entry_url, on_subtitle, on_link).await
    }
}
