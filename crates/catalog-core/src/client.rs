//! Page fetching
//!
//! The scraper only needs `fetch(url) -> HTML`. That capability is the
//! [`PageFetcher`] trait so hosts can plug in their own transport; this
//! module also provides [`HttpFetcher`], a reqwest-based implementation
//! with an optional client-side rate limiter.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::error::{CatalogError, Result};

/// Default User-Agent mimicking a modern browser
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default Accept-Language header
const DEFAULT_ACCEPT_LANGUAGE: &str = "ar,en-US;q=0.9,en;q=0.8";

/// Retrieves HTML documents.
///
/// Implementations decide on timeouts, throttling and any retry policy; the
/// scraper calls `fetch` once per operation and propagates its error.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch the HTML at an absolute URL.
    ///
    /// # Errors
    /// Any transport failure or non-success status.
    async fn fetch(&self, url: &str) -> Result<String>;
}

#[async_trait]
impl<T: PageFetcher + ?Sized> PageFetcher for Arc<T> {
    async fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url).await
    }
}

/// Rate limiter to control request frequency
///
/// Ensures that requests are spaced at least `min_interval` apart.
pub struct RateLimiter {
    /// Minimum interval between requests
    min_interval: Duration,
    /// Timestamp of the last request
    last_request: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// Create a new rate limiter with the specified requests per second
    ///
    /// # Example
    /// ```
    /// use catalog_core::client::RateLimiter;
    ///
    /// let limiter = RateLimiter::new(2.0).unwrap(); // 2 requests per second
    /// assert!(RateLimiter::new(0.0).is_err());
    /// ```
    ///
    /// # Errors
    /// `CatalogError::Config` when the rate is not positive or its interval
    /// does not fit in a `Duration`.
    pub fn new(requests_per_second: f64) -> Result<Self> {
        let min_interval = Duration::try_from_secs_f64(1.0 / requests_per_second)
            .ok()
            .filter(|_| requests_per_second > 0.0 && requests_per_second.is_finite())
            .ok_or_else(|| {
                CatalogError::Config(format!(
                    "requests_per_second must be a positive rate, got {}",
                    requests_per_second
                ))
            })?;
        let last = Instant::now()
            .checked_sub(min_interval)
            .unwrap_or_else(Instant::now);
        Ok(Self {
            min_interval,
            last_request: Arc::new(Mutex::new(last)),
        })
    }

    /// Wait until the next request is allowed
    pub async fn acquire(&self) {
        let mut last = self.last_request.lock().await;
        let elapsed = last.elapsed();

        if elapsed < self.min_interval {
            sleep(self.min_interval - elapsed).await;
        }

        *last = Instant::now();
    }

    /// Get the minimum interval between requests
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }
}

/// Configuration for [`HttpFetcher`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Maximum requests per second, unlimited when `None` (default)
    pub requests_per_second: Option<f64>,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header
    pub user_agent: String,
    /// Accept-Language header
    pub accept_language: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            requests_per_second: None,
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            accept_language: DEFAULT_ACCEPT_LANGUAGE.to_string(),
        }
    }
}

/// reqwest-backed [`PageFetcher`]
///
/// Every call is a fresh GET: no retries and no caching.
pub struct HttpFetcher {
    client: reqwest::Client,
    rate_limiter: Option<RateLimiter>,
}

impl HttpFetcher {
    /// Create a fetcher with default configuration
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be created
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a fetcher with custom configuration
    ///
    /// # Errors
    /// - `CatalogError::Config` if a header value or the rate is invalid
    /// - `CatalogError::Http` if the HTTP client cannot be created
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let mut headers = reqwest::header::HeaderMap::new();
        let accept_language = config
            .accept_language
            .parse()
            .map_err(|_| {
                CatalogError::Config(format!("invalid Accept-Language: {}", config.accept_language))
            })?;
        headers.insert(reqwest::header::ACCEPT_LANGUAGE, accept_language);

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        let rate_limiter = config
            .requests_per_second
            .map(RateLimiter::new)
            .transpose()?;

        Ok(Self {
            client,
            rate_limiter,
        })
    }

    /// Get a reference to the rate limiter (for testing)
    #[cfg(test)]
    pub fn rate_limiter(&self) -> Option<&RateLimiter> {
        self.rate_limiter.as_ref()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        if let Some(limiter) = &self.rate_limiter {
            limiter.acquire().await;
        }

        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(url, status = status.as_u16(), "fetched page");

        if status.is_success() {
            return Ok(response.text().await?);
        }

        warn!(url, status = status.as_u16(), "non-success response");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CatalogError::NotFound(url.to_string()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(CatalogError::RateLimited);
        }

        Err(CatalogError::HttpStatus {
            status: status.as_u16(),
            url: url.to_string(),
        })
    }
}
