//! Site adapter: every markup and URL assumption about the scraped site
//!
//! When the site changes its HTML, only the [`SiteSelectors`] here need to
//! change. Adapters can be built in code, taken from the bundled
//! [`SiteAdapter::faselhd`] preset, or loaded from JSON with any subset of
//! fields overridden.

use scraper::Selector;
use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, Result};
use crate::types::{MainPageSection, TvKind};

/// Base URL of the bundled preset
const FASELHD_BASE_URL: &str = "https://www.faselhds.care";

/// Placeholder replaced with the page number in [`SiteAdapter::page_suffix`]
const PAGE_PLACEHOLDER: &str = "{page}";

/// Placeholder replaced with the encoded query in [`SiteAdapter::search_path`]
const QUERY_PLACEHOLDER: &str = "{query}";

/// A listing section shown on the main page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionConfig {
    /// Path relative to the base URL (e.g. "/movies/")
    pub path: String,
    /// Display label (e.g. "Movies")
    pub label: String,
}

impl SectionConfig {
    pub fn new(path: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            label: label.into(),
        }
    }
}

/// CSS selectors for every piece of data the scraper reads
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    /// Card node on listing, search and related blocks
    pub card: String,
    pub card_title: String,
    pub card_link: String,
    pub card_poster: String,
    pub card_quality: String,
    pub card_year: String,
    /// Link to the next listing page
    pub next_page: String,

    pub detail_title: String,
    pub detail_poster: String,
    pub detail_year: String,
    pub detail_duration: String,
    pub detail_synopsis: String,
    pub detail_rating: String,
    pub detail_tags: String,

    pub cast_item: String,
    pub cast_name: String,
    pub cast_image: String,

    /// Card nodes of the "related titles" block
    pub recommendation_card: String,

    pub episode_item: String,
    pub episode_link: String,
    pub episode_title: String,
    pub episode_poster: String,

    /// Server entry on a detail page
    pub server_item: String,
    /// Attribute of the server entry holding the player URL
    pub server_link_attr: String,
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            card: "div.poster".to_string(),
            card_title: "div.h1".to_string(),
            card_link: "a".to_string(),
            card_poster: "img".to_string(),
            card_quality: "span.quality".to_string(),
            card_year: "span.year".to_string(),
            next_page: "a.next, a[rel='next'], .pagination .next a".to_string(),

            detail_title: "div.title h1".to_string(),
            detail_poster: "div.poster img".to_string(),
            detail_year: "span.year".to_string(),
            detail_duration: "span.runtime".to_string(),
            detail_synopsis: "div.description".to_string(),
            detail_rating: "span.rating".to_string(),
            detail_tags: "div.genres a".to_string(),

            cast_item: "div.cast div.person".to_string(),
            cast_name: "div.name".to_string(),
            cast_image: "img".to_string(),

            recommendation_card: "div.related div.poster".to_string(),

            episode_item: "div.episodes div.episode".to_string(),
            episode_link: "a".to_string(),
            episode_title: "h3".to_string(),
            episode_poster: "img".to_string(),

            server_item: "div.servers-list li".to_string(),
            server_link_attr: "data-link".to_string(),
        }
    }
}

/// Description of one scrapeable site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteAdapter {
    /// Provider name, also used as the stream link label
    pub name: String,
    /// Scheme and host, without trailing slash
    pub base_url: String,
    /// Content language tag (e.g. "ar")
    pub lang: String,
    /// Kinds of titles the site lists
    pub supported_kinds: Vec<TvKind>,
    /// Main-page menu
    pub sections: Vec<SectionConfig>,
    /// Appended to a section URL for pages after the first
    pub page_suffix: String,
    /// Search path with a `{query}` placeholder
    pub search_path: String,
    /// Path fragments marking a URL as a series
    pub series_path_tokens: Vec<String>,
    /// Image attributes tried in order for poster URLs
    pub image_attrs: Vec<String>,
    pub selectors: SiteSelectors,
}

impl Default for SiteAdapter {
    fn default() -> Self {
        Self::faselhd()
    }
}

impl SiteAdapter {
    /// The bundled FaselHD preset
    pub fn faselhd() -> Self {
        Self {
            name: "FaselHD".to_string(),
            base_url: FASELHD_BASE_URL.to_string(),
            lang: "ar".to_string(),
            supported_kinds: vec![TvKind::Movie, TvKind::Series],
            sections: vec![
                SectionConfig::new("/movies/", "Movies"),
                SectionConfig::new("/series/", "Series"),
                SectionConfig::new("/anime/", "Anime"),
            ],
            page_suffix: "page/{page}/".to_string(),
            search_path: "/?s={query}".to_string(),
            series_path_tokens: vec!["/series/".to_string(), "/episode/".to_string()],
            image_attrs: vec!["src".to_string(), "data-src".to_string()],
            selectors: SiteSelectors::default(),
        }
    }

    /// Load an adapter from JSON.
    ///
    /// Missing fields fall back to the FaselHD preset, so a file containing
    /// only `{"base_url": "https://mirror.example"}` is valid.
    ///
    /// # Errors
    /// `CatalogError::Config` if the JSON is malformed or `base_url` is empty.
    pub fn from_json(json: &str) -> Result<Self> {
        let adapter: SiteAdapter = serde_json::from_str(json)?;
        if adapter.base_url.trim().is_empty() {
            return Err(CatalogError::Config("base_url cannot be empty".to_string()));
        }
        Ok(adapter)
    }

    /// Compile all selectors.
    ///
    /// # Errors
    /// `CatalogError::InvalidSelector` naming the first selector that fails to parse.
    pub fn compile(self) -> Result<CompiledSite> {
        CompiledSite::new(self)
    }

    /// Resolve an href found on the site into an absolute URL.
    ///
    /// Absolute URLs are kept, protocol-relative ones get `https:`, paths are
    /// joined to the base URL. Empty input stays empty.
    pub fn resolve_url(&self, href: &str) -> String {
        let href = href.trim();
        if href.is_empty() {
            return String::new();
        }
        if href.starts_with("http://") || href.starts_with("https://") {
            return href.to_string();
        }
        if let Some(rest) = href.strip_prefix("//") {
            return format!("https://{}", rest);
        }

        let base = self.base_url.trim_end_matches('/');
        if href.starts_with('/') {
            format!("{}{}", base, href)
        } else {
            format!("{}/{}", base, href)
        }
    }

    /// Absolute URL of a configured section
    pub fn section_url(&self, section: &SectionConfig) -> String {
        self.resolve_url(&section.path)
    }

    /// Main-page menu with absolute URLs
    pub fn main_page(&self) -> Vec<MainPageSection> {
        self.sections
            .iter()
            .map(|section| MainPageSection {
                label: section.label.clone(),
                url: self.section_url(section),
            })
            .collect()
    }

    /// Label of the section whose URL matches `section_url`, if any
    pub fn section_label(&self, section_url: &str) -> Option<&str> {
        let wanted = section_url.trim_end_matches('/');
        self.sections
            .iter()
            .find(|s| self.section_url(s).trim_end_matches('/') == wanted)
            .map(|s| s.label.as_str())
    }

    /// URL of page `page` of a listing; the first page is the section URL itself.
    pub fn page_url(&self, section_url: &str, page: u32) -> String {
        let section_url = self.resolve_url(section_url);
        if page <= 1 {
            return section_url;
        }

        let suffix = self.page_suffix.replace(PAGE_PLACEHOLDER, &page.to_string());
        if section_url.ends_with('/') {
            format!("{}{}", section_url, suffix)
        } else {
            format!("{}/{}", section_url, suffix)
        }
    }

    /// Search URL for a query, query URL-encoded
    pub fn search_url(&self, query: &str) -> String {
        let encoded = urlencoding::encode(query);
        let path = self.search_path.replace(QUERY_PLACEHOLDER, &encoded);
        self.resolve_url(&path)
    }

    /// Movie or series, from the URL path alone
    pub fn classify(&self, url: &str) -> TvKind {
        if self
            .series_path_tokens
            .iter()
            .any(|token| url.contains(token.as_str()))
        {
            TvKind::Series
        } else {
            TvKind::Movie
        }
    }
}

/// Parsed selectors, one field per [`SiteSelectors`] entry
#[derive(Debug, Clone)]
pub struct Selectors {
    pub card: Selector,
    pub card_title: Selector,
    pub card_link: Selector,
    pub card_poster: Selector,
    pub card_quality: Selector,
    pub card_year: Selector,
    pub next_page: Selector,
    pub detail_title: Selector,
    pub detail_poster: Selector,
    pub detail_year: Selector,
    pub detail_duration: Selector,
    pub detail_synopsis: Selector,
    pub detail_rating: Selector,
    pub detail_tags: Selector,
    pub cast_item: Selector,
    pub cast_name: Selector,
    pub cast_image: Selector,
    pub recommendation_card: Selector,
    pub episode_item: Selector,
    pub episode_link: Selector,
    pub episode_title: Selector,
    pub episode_poster: Selector,
    pub server_item: Selector,
}

/// A site adapter with its selectors compiled, ready for the parsers
#[derive(Debug, Clone)]
pub struct CompiledSite {
    adapter: SiteAdapter,
    selectors: Selectors,
}

impl CompiledSite {
    /// Compile the selectors of `adapter`
    pub fn new(adapter: SiteAdapter) -> Result<Self> {
        let s = &adapter.selectors;
        let selectors = Selectors {
            card: compile("card", &s.card)?,
            card_title: compile("card_title", &s.card_title)?,
            card_link: compile("card_link", &s.card_link)?,
            card_poster: compile("card_poster", &s.card_poster)?,
            card_quality: compile("card_quality", &s.card_quality)?,
            card_year: compile("card_year", &s.card_year)?,
            next_page: compile("next_page", &s.next_page)?,
            detail_title: compile("detail_title", &s.detail_title)?,
            detail_poster: compile("detail_poster", &s.detail_poster)?,
            detail_year: compile("detail_year", &s.detail_year)?,
            detail_duration: compile("detail_duration", &s.detail_duration)?,
            detail_synopsis: compile("detail_synopsis", &s.detail_synopsis)?,
            detail_rating: compile("detail_rating", &s.detail_rating)?,
            detail_tags: compile("detail_tags", &s.detail_tags)?,
            cast_item: compile("cast_item", &s.cast_item)?,
            cast_name: compile("cast_name", &s.cast_name)?,
            cast_image: compile("cast_image", &s.cast_image)?,
            recommendation_card: compile("recommendation_card", &s.recommendation_card)?,
            episode_item: compile("episode_item", &s.episode_item)?,
            episode_link: compile("episode_link", &s.episode_link)?,
            episode_title: compile("episode_title", &s.episode_title)?,
            episode_poster: compile("episode_poster", &s.episode_poster)?,
            server_item: compile("server_item", &s.server_item)?,
        };

        Ok(Self { adapter, selectors })
    }

    /// The FaselHD preset, compiled
    pub fn faselhd() -> Result<Self> {
        Self::new(SiteAdapter::faselhd())
    }

    pub fn adapter(&self) -> &SiteAdapter {
        &self.adapter
    }

    pub fn selectors(&self) -> &Selectors {
        &self.selectors
    }
}

fn compile(name: &'static str, selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|_| CatalogError::InvalidSelector {
        name,
        selector: selector.to_string(),
    })
}
