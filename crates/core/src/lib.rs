pub mod analyzer;
pub mod error;
pub mod extract;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod formatters;
pub mod metadata;
pub mod parse;
pub mod preprocess;
pub mod scoring;
pub mod search;
pub mod themes;
pub mod tokenize;
#[cfg(feature = "fetch")]
pub mod web;

pub use analyzer::{
    AnalysisResult, AnalyzerConfig, AnalyzerConfigBuilder, LanguagePatterns, Statistics, TextAnalyzer, TopWords,
};
pub use error::{GleanerError, Result};
pub use extract::{ExtractConfig, extract_text, render_text};
#[cfg(feature = "fetch")]
pub use fetch::{DEFAULT_USER_AGENT, FetchConfig, HttpFetcher, PageFetcher, fetch_file, fetch_stdin, fetch_url};
pub use formatters::{JsonConfig, JsonFormatter, TextConfig, TextFormatter, error_to_json};
pub use metadata::Metadata;
pub use parse::{Document, Element};
#[doc(hidden)]
pub use preprocess::{PreprocessConfig, preprocess_html};
#[doc(hidden)]
pub use scoring::{Candidate, ScoreConfig, score_candidates, top_candidate};
pub use search::{MatchContext, SearchResult, search_content};
pub use themes::{BUILTIN_THEMES, Theme, ThemeScores, ThemeTable};
pub use tokenize::{StopwordSet, Tokenizer, is_alphanumeric};
#[cfg(feature = "fetch")]
pub use web::{
    NO_CONTENT_MESSAGE, SavedText, ScrapedItem, ScraperConfig, ScraperConfigBuilder, Sleeper, TokioSleeper,
    WebScraper, list_items_from_html,
};
