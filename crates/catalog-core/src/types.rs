//! Data types for the catalog scraper
//!
//! This module contains the records produced by the parsers. They are built
//! once per request and handed to the caller; nothing here is cached.
//! All types implement Serialize and Deserialize for JSON compatibility with Tauri.

use serde::{Deserialize, Serialize};

/// Kind of title, inferred from the URL path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TvKind {
    /// Single feature, no episodes
    Movie,
    /// Series or anime with an episode list
    Series,
}

/// One card from a listing, search or recommendations block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Display title (never empty)
    pub title: String,
    /// Absolute URL of the detail page (never empty)
    pub url: String,
    /// Absolute poster URL, empty when the card has no image
    pub poster_url: String,
    /// Release year
    pub year: Option<i32>,
    /// Movie or series
    pub kind: TvKind,
    /// Quality badge text shown on the card (e.g. "HD")
    pub quality: Option<String>,
}

/// Episode of a series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodeEntry {
    /// Absolute URL of the episode page
    pub url: String,
    /// Display title as shown on the site
    pub title: String,
    /// First number found in the title
    pub episode_number: Option<u32>,
    /// Thumbnail URL, empty when missing
    pub poster_url: String,
}

/// Cast member shown on a detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastMember {
    pub name: String,
    /// Portrait URL, empty when missing
    pub image_url: String,
}

/// Everything a detail page says about one title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    /// URL the record was loaded from
    pub url: String,
    pub title: String,
    pub kind: TvKind,
    pub poster_url: String,
    pub year: Option<i32>,
    pub duration_minutes: Option<u32>,
    pub synopsis: Option<String>,
    /// Rating normalized to 0.0 - 10.0
    pub rating: Option<f32>,
    /// Genre tags, deduplicated in document order
    pub tags: Vec<String>,
    pub cast: Vec<CastMember>,
    pub recommendations: Vec<CatalogEntry>,
    /// `None` for movies
    pub episodes: Option<Vec<EpisodeEntry>>,
}

impl DetailRecord {
    /// Whether this record describes a movie
    pub fn is_movie(&self) -> bool {
        self.kind == TvKind::Movie
    }
}

/// Coarse resolution tier inferred from a server's display text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Quality {
    P1080,
    P720,
    P480,
    P360,
    Unknown,
}

impl Quality {
    /// Classify a server label.
    ///
    /// Checked in priority order 1080, 720, 480, 360; the first substring
    /// found wins, so "1080 / 720" is `P1080`.
    pub fn from_label(label: &str) -> Self {
        const TIERS: [(&str, Quality); 4] = [
            ("1080", Quality::P1080),
            ("720", Quality::P720),
            ("480", Quality::P480),
            ("360", Quality::P360),
        ];

        TIERS
            .iter()
            .find(|(needle, _)| label.contains(*needle))
            .map(|(_, quality)| *quality)
            .unwrap_or(Quality::Unknown)
    }

    /// Vertical resolution in pixels, `None` for `Unknown`
    pub fn height(&self) -> Option<u32> {
        match self {
            Quality::P1080 => Some(1080),
            Quality::P720 => Some(720),
            Quality::P480 => Some(480),
            Quality::P360 => Some(360),
            Quality::Unknown => None,
        }
    }
}

/// Playable source found on a detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamLink {
    /// Source label (the site name)
    pub label: String,
    /// URL of the embedded player or stream
    pub source_url: String,
    /// Site base URL, sent as referer by players
    pub origin_url: String,
    pub quality: Quality,
}

/// Subtitle track delivered through the subtitle callback
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubtitleFile {
    pub lang: String,
    pub url: String,
}

/// Entry of the main-page menu
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainPageSection {
    /// Display label (e.g. "Movies")
    pub label: String,
    /// Absolute URL of the first listing page
    pub url: String,
}

/// One page of a section listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Label of the section this page belongs to
    pub section: String,
    /// Cards on the current page
    pub items: Vec<CatalogEntry>,
    /// Current page number (1-based)
    pub current_page: u32,
    /// Whether the page links to a next page
    pub has_next_page: bool,
}

impl CatalogPage {
    /// Create a new catalog page
    pub fn new(
        section: impl Into<String>,
        items: Vec<CatalogEntry>,
        current_page: u32,
        has_next_page: bool,
    ) -> Self {
        Self {
            section: section.into(),
            items,
            current_page,
            has_next_page,
        }
    }
}
