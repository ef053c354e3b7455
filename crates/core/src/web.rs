//! Retrying web scraper.
//!
//! [`WebScraper`] downloads pages through a [`PageFetcher`], extracts readable
//! text, lists, and metadata, and saves text to disk. Network failures never
//! escape as errors: text and metadata come back as `None`, list items as an
//! empty `Vec`, and the cause is logged.
//!
//! # Example
//!
//! ```rust,no_run
//! use gleaner_core::WebScraper;
//!
//! # #[tokio::main]
//! # async fn main() -> gleaner_core::Result<()> {
//! let scraper = WebScraper::new()?;
//! if let Some(text) = scraper.get_website_text_content("https://example.com", 3).await {
//!     println!("{}", scraper.get_text_preview(&text, 200));
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::Serialize;

use crate::extract::{ExtractConfig, extract_text};
use crate::fetch::{FetchConfig, HttpFetcher, PageFetcher};
use crate::metadata::Metadata;
use crate::parse::Document;
use crate::{GleanerError, Result};

/// Class tokens that mark list-like containers.
static LIST_CONTAINER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"list|items|products|projects").unwrap());

const LIST_CONTAINER_TAGS: &[&str] = &["ul", "ol", "div"];

/// Returned by [`WebScraper::get_text_preview`] for empty text.
pub const NO_CONTENT_MESSAGE: &str = "No content available";

/// Configuration for [`WebScraper`].
///
/// # Example
///
/// ```rust
/// use gleaner_core::ScraperConfig;
///
/// let config = ScraperConfig::builder()
///     .max_retries(5)
///     .output_dir("out")
///     .timeout(10)
///     .build();
/// assert_eq!(config.fetch.timeout, 10);
/// ```
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// HTTP settings (timeout, User-Agent).
    pub fetch: FetchConfig,

    /// Attempts made by text scraping (default: 3).
    pub max_retries: usize,

    /// Directory for saved text (default: `scraped_content`).
    pub output_dir: PathBuf,

    /// Preview length in characters (default: 1000).
    pub preview_length: usize,

    /// Readable-text extraction settings.
    pub extract: ExtractConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            max_retries: 3,
            output_dir: PathBuf::from("scraped_content"),
            preview_length: 1000,
            extract: ExtractConfig::default(),
        }
    }
}

impl ScraperConfig {
    /// Creates a new builder for ScraperConfig.
    pub fn builder() -> ScraperConfigBuilder {
        ScraperConfigBuilder::new()
    }
}

/// Builder for ScraperConfig.
pub struct ScraperConfigBuilder {
    config: ScraperConfig,
}

impl ScraperConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: ScraperConfig::default() }
    }

    /// Replaces the HTTP settings.
    pub fn fetch(mut self, value: FetchConfig) -> Self {
        self.config.fetch = value;
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent header.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Sets the number of text-scraping attempts.
    pub fn max_retries(mut self, value: usize) -> Self {
        self.config.max_retries = value;
        self
    }

    /// Sets the directory saved files are written to.
    pub fn output_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.output_dir = value.into();
        self
    }

    /// Sets the preview length.
    pub fn preview_length(mut self, value: usize) -> Self {
        self.config.preview_length = value;
        self
    }

    /// Replaces the extraction settings.
    pub fn extract(mut self, value: ExtractConfig) -> Self {
        self.config.extract = value;
        self
    }

    /// Builds the config.
    pub fn build(self) -> ScraperConfig {
        self.config
    }
}

impl Default for ScraperConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Delay between scrape attempts.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// [`Sleeper`] backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// One entry found by [`WebScraper::scrape_list_items`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScrapedItem {
    pub name: String,
    pub source: String,
    pub url: String,
}

/// Result of [`WebScraper::save_text_to_file`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedText {
    Written(PathBuf),
    NothingToSave,
}

impl fmt::Display for SavedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SavedText::Written(path) => write!(f, "{}", path.display()),
            SavedText::NothingToSave => write!(f, "No content to save"),
        }
    }
}

/// Web scraper with retrying text extraction.
///
/// Generic over the page source and the retry delay; the defaults use a live
/// HTTP client and the tokio timer.
pub struct WebScraper<F: PageFetcher = HttpFetcher, S: Sleeper = TokioSleeper> {
    config: ScraperConfig,
    fetcher: F,
    sleeper: S,
}

impl WebScraper {
    /// Creates a scraper with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`GleanerError::HttpError`] if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(ScraperConfig::default())
    }

    /// Creates a scraper with a custom configuration.
    pub fn with_config(config: ScraperConfig) -> Result<Self> {
        let fetcher = HttpFetcher::new(config.fetch.clone())?;
        Ok(Self::with_parts(config, fetcher, TokioSleeper))
    }
}

impl<F: PageFetcher, S: Sleeper> WebScraper<F, S> {
    /// Creates a scraper from explicit collaborators.
    pub fn with_parts(config: ScraperConfig, fetcher: F, sleeper: S) -> Self {
        Self { config, fetcher, sleeper }
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    pub fn sleeper(&self) -> &S {
        &self.sleeper
    }

    /// Downloads `url` and extracts its readable text, retrying on failure.
    ///
    /// Makes up to `max_retries` attempts. A failed fetch, an empty body, or
    /// an empty extraction fails the attempt; between attempts the scraper
    /// waits 1s, 2s, ... Returns `None` when every attempt failed.
    pub async fn get_website_text_content(&self, url: &str, max_retries: usize) -> Option<String> {
        for attempt in 0..max_retries {
            tracing::info!(url, "Starting to scrape URL");

            match self.attempt(url).await {
                Ok(text) => return Some(text),
                Err(e) => tracing::warn!(url, "Attempt {} failed: {}", attempt + 1, e),
            }

            if attempt + 1 < max_retries {
                let wait = attempt as u64 + 1;
                tracing::info!("Retrying in {} seconds...", wait);
                self.sleeper.sleep(Duration::from_secs(wait)).await;
            }
        }

        None
    }

    /// [`get_website_text_content`](Self::get_website_text_content) with the
    /// configured `max_retries`.
    pub async fn scrape_text(&self, url: &str) -> Option<String> {
        self.get_website_text_content(url, self.config.max_retries).await
    }

    async fn attempt(&self, url: &str) -> Result<String> {
        let html = self.fetcher.fetch(url).await?;
        if html.trim().is_empty() {
            return Err(GleanerError::NoContent);
        }
        extract_text(&html, &self.config.extract)
    }

    /// Returns at most `max_length` characters of `text`, with `...` appended
    /// when it was cut.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gleaner_core::WebScraper;
    ///
    /// let scraper = WebScraper::new().unwrap();
    /// assert_eq!(scraper.get_text_preview("abcdefghij", 5), "abcde...");
    /// assert_eq!(scraper.get_text_preview("", 5), "No content available");
    /// ```
    pub fn get_text_preview(&self, text: &str, max_length: usize) -> String {
        if text.is_empty() {
            return NO_CONTENT_MESSAGE.to_string();
        }

        match text.char_indices().nth(max_length) {
            Some((cut, _)) => format!("{}...", &text[..cut]),
            None => text.to_string(),
        }
    }

    /// [`get_text_preview`](Self::get_text_preview) with the configured
    /// `preview_length`.
    pub fn preview(&self, text: &str) -> String {
        self.get_text_preview(text, self.config.preview_length)
    }

    /// Writes `text` under the configured output directory.
    ///
    /// Without a filename, `scraped_content_<unix seconds>.txt` is used. The
    /// directory is created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`GleanerError::Io`] if the directory or file cannot be written.
    pub fn save_text_to_file(&self, text: &str, filename: Option<&str>) -> Result<SavedText> {
        if text.is_empty() {
            return Ok(SavedText::NothingToSave);
        }

        let filename = match filename.filter(|f| !f.is_empty()) {
            Some(name) => name.to_string(),
            None => format!("scraped_content_{}.txt", time::OffsetDateTime::now_utc().unix_timestamp()),
        };

        fs::create_dir_all(&self.config.output_dir)?;
        let path = self.config.output_dir.join(filename);
        fs::write(&path, text)?;

        tracing::debug!(path = %path.display(), bytes = text.len(), "saved text");
        Ok(SavedText::Written(path))
    }

    /// Collects list entries from `url`.
    ///
    /// With a selector, each matching element is one item. Without one, every
    /// `li` inside a `ul`/`ol`/`div` whose class looks list-like is an item.
    /// Failures are logged and produce an empty list.
    pub async fn scrape_list_items(&self, url: &str, list_selector: Option<&str>) -> Vec<ScrapedItem> {
        let result = match self.fetcher.fetch(url).await {
            Ok(html) => list_items_from_html(&html, url, list_selector),
            Err(e) => Err(e),
        };

        result.unwrap_or_else(|e| {
            tracing::error!(url, "Error scraping list items: {}", e);
            Vec::new()
        })
    }

    /// Fetches `url` and extracts title, author, date, and description.
    ///
    /// Returns `None` if the page could not be fetched or its body is empty.
    pub async fn get_website_metadata(&self, url: &str) -> Option<Metadata> {
        let fetched = self.fetcher.fetch(url).await.and_then(|html| {
            if html.trim().is_empty() { Err(GleanerError::NoContent) } else { Ok(html) }
        });

        match fetched {
            Ok(html) => Some(Document::parse(&html).extract_metadata()),
            Err(e) => {
                tracing::error!(url, "Error getting metadata: {}", e);
                None
            }
        }
    }
}

/// List entries in already-downloaded HTML; see [`WebScraper::scrape_list_items`].
///
/// # Errors
///
/// Returns [`GleanerError::HtmlParseError`] for an invalid selector.
pub fn list_items_from_html(html: &str, source_url: &str, list_selector: Option<&str>) -> Result<Vec<ScrapedItem>> {
    let doc = Document::parse(html);

    let elements = match list_selector.filter(|s| !s.is_empty()) {
        Some(selector) => doc.select(selector)?,
        None => {
            let mut items = Vec::new();
            for container in doc.find_by_class(LIST_CONTAINER_TAGS, &LIST_CONTAINER) {
                items.extend(container.select("li")?);
            }
            items
        }
    };

    Ok(elements
        .iter()
        .map(|el| el.stripped_text())
        .filter(|name| !name.is_empty())
        .map(|name| ScrapedItem { name, source: source_url.to_string(), url: source_url.to_string() })
        .collect())
}
