//! Error types for the catalog scraper
//!
//! Only two things can fail: fetching a page and setting the scraper up
//! (bad selectors or config). A selector that matches nothing on a fetched
//! page is never an error; parsers resolve it to an empty or absent value.
//! CatalogError implements Serialize for Tauri compatibility.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for catalog scraper operations
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Transport-level failure (connect, TLS, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Requested page does not exist (HTTP 404)
    #[error("Page not found: {0}")]
    NotFound(String),

    /// Rate limited by the server (HTTP 429)
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Search was called with an empty or whitespace-only query
    #[error("Search query cannot be empty")]
    EmptyQuery,

    /// A site adapter selector failed to compile
    #[error("Invalid selector `{name}`: {selector}")]
    InvalidSelector { name: &'static str, selector: String },

    /// Site adapter or client configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl CatalogError {
    /// Whether this error came from retrieving a page.
    ///
    /// Fetch errors abort the current operation; everything else is a
    /// caller or setup mistake.
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            CatalogError::Http(_)
                | CatalogError::HttpStatus { .. }
                | CatalogError::NotFound(_)
                | CatalogError::RateLimited
        )
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(err: serde_json::Error) -> Self {
        CatalogError::Config(err.to_string())
    }
}

/// Serialize CatalogError as a string for Tauri compatibility
impl Serialize for CatalogError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for catalog scraper operations
pub type Result<T> = std::result::Result<T, CatalogError>;
