//! Content fetching from URLs, files, and stdin.
//!
//! Network access goes through the [`PageFetcher`] trait so the scraper can be
//! driven by something other than a live HTTP client. [`HttpFetcher`] is the
//! default implementation.

use std::fs;
use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{GleanerError, Result};

/// Browser-like User-Agent sent with every scraper request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// Custom User-Agent string.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self { timeout: 30, user_agent: DEFAULT_USER_AGENT.to_string() }
    }
}

/// Source of raw page content.
///
/// Implementations return the response body on a 2xx answer and an error
/// otherwise. An empty body is returned as-is; callers decide what that means.
pub trait PageFetcher: Send + Sync {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<String>> + Send;
}

/// [`PageFetcher`] backed by a reusable reqwest client.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
}

impl HttpFetcher {
    /// Builds the underlying client with the configured timeout.
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(GleanerError::HttpError)?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        get_with_client(&self.client, url, &self.config).await
    }
}

/// Fetches HTML content from a URL.
///
/// Performs a GET with the configured User-Agent and returns the body as text.
/// Non-2xx responses are reported as [`GleanerError::HttpStatus`].
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(GleanerError::HttpError)?;

    get_with_client(&client, url, config).await
}

async fn get_with_client(client: &Client, url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = parse_http_url(url)?;

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header(
            "Accept",
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        )
        .header("Accept-Language", "en-US,en;q=0.9")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                GleanerError::Timeout { timeout: config.timeout }
            } else {
                GleanerError::HttpError(e)
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(GleanerError::HttpStatus { status: status.as_u16(), url: url.to_string() });
    }

    let content = response.text().await?;
    tracing::debug!(url, bytes = content.len(), "fetched page");

    Ok(content)
}

/// Validates that `url` is an absolute http(s) URL.
pub fn parse_http_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| GleanerError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        other => Err(GleanerError::InvalidUrl(format!(
            "unsupported scheme '{}', expected http:// or https://",
            other
        ))),
    }
}

/// Reads text content from a local file.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(GleanerError::FileNotFound(path_buf))
    } else {
        fs::read_to_string(&path_buf).map_err(GleanerError::from)
    }
}

/// Reads all of standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(GleanerError::from)?;

    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_config_default() {
        let config = FetchConfig::default();
        assert_eq!(config.timeout, 30);
        assert!(config.user_agent.starts_with("Mozilla/5.0 (Windows NT 10.0"));
    }

    #[test]
    fn test_fetch_url_invalid() {
        let config = FetchConfig::default();
        let result = std::thread::spawn(move || {
            tokio::runtime::Runtime::new()
                .unwrap()
                .block_on(fetch_url("not-a-url", &config))
        })
        .join()
        .unwrap();

        assert!(matches!(result, Err(GleanerError::InvalidUrl(_))));
    }

    #[test]
    fn test_parse_http_url_rejects_other_schemes() {
        assert!(parse_http_url("https://example.com").is_ok());
        assert!(parse_http_url("http://example.com/a?b=c").is_ok());
        assert!(matches!(parse_http_url("ftp://example.com"), Err(GleanerError::InvalidUrl(_))));
        assert!(matches!(parse_http_url("example.com"), Err(GleanerError::InvalidUrl(_))));
    }

    #[test]
    fn test_http_fetcher_keeps_config() {
        let config = FetchConfig { timeout: 5, user_agent: "test-agent".to_string() };
        let fetcher = HttpFetcher::new(config).unwrap();
        assert_eq!(fetcher.config().timeout, 5);
        assert_eq!(fetcher.config().user_agent, "test-agent");
    }

    #[test]
    fn test_fetch_file_not_found() {
        let result = fetch_file("/nonexistent/path/file.txt");
        assert!(matches!(result, Err(GleanerError::FileNotFound(_))));
    }

    #[test]
    fn test_fetch_file_reads_contents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "hello world").unwrap();

        let content = fetch_file(path.to_str().unwrap()).unwrap();
        assert_eq!(content, "hello world");
    }
}
