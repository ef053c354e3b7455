//! Error types for Gleaner operations.
//!
//! This module defines the main error type [`GleanerError`] which covers
//! input validation, text analysis, HTTP fetching, HTML parsing, extraction,
//! and file I/O.
//!
//! # Example
//!
//! ```rust
//! use gleaner_core::{GleanerError, Result};
//!
//! fn require_text(text: &str) -> Result<&str> {
//!     if text.is_empty() {
//!         return Err(GleanerError::EmptyInput("No text provided for analysis".to_string()));
//!     }
//!     Ok(text)
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for analysis and scraping operations.
///
/// # Example
///
/// ```rust
/// use gleaner_core::{GleanerError, TextAnalyzer};
///
/// let analyzer = TextAnalyzer::new();
/// match analyzer.analyze_text("") {
///     Ok(result) => println!("{} words", result.statistics.total_words),
///     Err(GleanerError::EmptyInput(msg)) => println!("{}", msg),
///     Err(e) => println!("Error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum GleanerError {
    /// Missing or empty text / search term.
    ///
    /// Returned before any work is attempted.
    #[error("{0}")]
    EmptyInput(String),

    /// Failure while analyzing text.
    #[error("Error analyzing text: {0}")]
    Analysis(String),

    /// Failure while searching text.
    #[error("Error searching content: {0}")]
    Search(String),

    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status} returned for {url}")]
    HttpStatus { status: u16, url: String },

    /// Request timeout.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors, including invalid CSS selectors.
    #[error("Failed to parse HTML: {0}")]
    HtmlParseError(String),

    /// No readable content could be extracted from the document.
    #[error("No content could be extracted from the document")]
    NoContent,

    /// File not found.
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    /// Wraps standard I/O errors for file operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for GleanerError.
pub type Result<T> = std::result::Result<T, GleanerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GleanerError::InvalidUrl("not a url".to_string());
        assert!(err.to_string().contains("Invalid URL"));
    }

    #[test]
    fn test_empty_input_is_verbatim() {
        let err = GleanerError::EmptyInput("No text provided for analysis".to_string());
        assert_eq!(err.to_string(), "No text provided for analysis");
    }

    #[test]
    fn test_analysis_and_search_prefixes() {
        let err = GleanerError::Analysis("bad table".to_string());
        assert_eq!(err.to_string(), "Error analyzing text: bad table");

        let err = GleanerError::Search("bad pattern".to_string());
        assert_eq!(err.to_string(), "Error searching content: bad pattern");
    }

    #[test]
    fn test_http_status_error() {
        let err = GleanerError::HttpStatus { status: 404, url: "https://example.com/x".to_string() };
        assert!(err.to_string().contains("404"));
        assert!(err.to_string().contains("example.com"));
    }

    #[test]
    fn test_timeout_error() {
        let err = GleanerError::Timeout { timeout: 30 };
        assert!(err.to_string().contains("30"));
    }
}
