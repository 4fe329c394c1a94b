//! Catalog Scraper Core Library
//!
//! This crate turns the HTML of a movie/series streaming site into
//! structured catalog records.
//!
//! # Features
//! - Main-page sections with paginated listings
//! - Search by title
//! - Detail records with cast, tags, recommendations and episodes
//! - Stream link extraction with quality classification
//! - All site markup isolated in a [`SiteAdapter`], loadable from JSON
//! - Pluggable transport through [`PageFetcher`]

pub mod client;
pub mod error;
pub mod parser;
pub mod provider;
pub mod scraper;
pub mod site;
pub mod types;

// Re-export main types for convenience
pub use client::{ClientConfig, HttpFetcher, PageFetcher, RateLimiter};
pub use error::{CatalogError, Result};
pub use provider::CatalogProvider;
pub use self::scraper::CatalogScraper;
pub use site::{CompiledSite, SectionConfig, SiteAdapter, SiteSelectors};
pub use types::{
    CastMember, CatalogEntry, CatalogPage, DetailRecord, EpisodeEntry, MainPageSection, Quality,
    StreamLink, SubtitleFile, TvKind,
};
