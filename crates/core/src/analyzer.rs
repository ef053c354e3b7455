//! Text analysis API.
//!
//! [`TextAnalyzer`] computes word statistics, keyword-theme scores, simple
//! punctuation patterns, and the most frequent content words of a text.
//!
//! # Example
//!
//! ```rust
//! use gleaner_core::TextAnalyzer;
//!
//! let analyzer = TextAnalyzer::new();
//! let result = analyzer.analyze_text("Shared gardens bring neighbors together. Join us!").unwrap();
//!
//! assert_eq!(result.language_patterns.sentence_count, 2);
//! assert_eq!(result.themes.get("community"), Some(1.0));
//! ```

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde::ser::Serializer;

use crate::search::{SearchResult, search_content};
use crate::themes::{ThemeScores, ThemeTable};
use crate::tokenize::{StopwordSet, Tokenizer, is_alphanumeric};
use crate::{GleanerError, Result};

static QUESTION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\?").unwrap());
static EXCLAMATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!").unwrap());
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[.!?]+").unwrap());
static PARAGRAPH_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n\s*\n").unwrap());

/// Configuration for [`TextAnalyzer`].
///
/// # Example
///
/// ```rust
/// use gleaner_core::AnalyzerConfig;
///
/// let config = AnalyzerConfig::builder()
///     .top_words_limit(5)
///     .extra_stopwords(["gardens"])
///     .build();
/// assert_eq!(config.top_words_limit, 5);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Maximum number of entries in `top_words` (default: 20).
    pub top_words_limit: usize,

    /// Characters of context on each side of a search match (default: 100).
    pub context_radius: usize,

    /// Theme table used for scoring (default: built-in table).
    pub themes: ThemeTable,

    /// Base stopword set (default: English).
    pub stopwords: StopwordSet,

    /// Words excluded in addition to `stopwords`.
    pub extra_stopwords: Vec<String>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            top_words_limit: 20,
            context_radius: 100,
            themes: ThemeTable::default(),
            stopwords: StopwordSet::english(),
            extra_stopwords: Vec::new(),
        }
    }
}

impl AnalyzerConfig {
    /// Creates a new builder for AnalyzerConfig.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::new()
    }
}

/// Builder for AnalyzerConfig.
pub struct AnalyzerConfigBuilder {
    config: AnalyzerConfig,
}

impl AnalyzerConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: AnalyzerConfig::default() }
    }

    /// Sets the maximum number of top words.
    pub fn top_words_limit(mut self, value: usize) -> Self {
        self.config.top_words_limit = value;
        self
    }

    /// Sets the search context radius in characters.
    pub fn context_radius(mut self, value: usize) -> Self {
        self.config.context_radius = value;
        self
    }

    /// Replaces the theme table.
    pub fn themes(mut self, value: ThemeTable) -> Self {
        self.config.themes = value;
        self
    }

    /// Replaces the base stopword set.
    pub fn stopwords(mut self, value: StopwordSet) -> Self {
        self.config.stopwords = value;
        self
    }

    /// Adds words to exclude on top of the stopword set.
    pub fn extra_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extra_stopwords.extend(words.into_iter().map(Into::into));
        self
    }

    /// Builds the config.
    pub fn build(self) -> AnalyzerConfig {
        self.config
    }
}

impl Default for AnalyzerConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Complete analysis of one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub statistics: Statistics,
    pub themes: ThemeScores,
    pub language_patterns: LanguagePatterns,
    pub top_words: TopWords,
}

/// Token-level counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Statistics {
    /// Number of tokens, punctuation and stopwords included.
    pub total_words: usize,
    /// Number of distinct tokens.
    pub unique_words: usize,
    /// Mean token length in characters; zero for a text with no tokens.
    pub average_word_length: f64,
}

/// Punctuation-based structure counts over the original text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LanguagePatterns {
    pub question_count: usize,
    pub exclamation_count: usize,
    /// Runs of `.`, `!` or `?`; `"Wait..."` counts once.
    pub sentence_count: usize,
    /// Blank-line separated blocks.
    pub paragraph_count: usize,
    /// Whitespace-separated words per sentence; zero without sentences.
    pub average_sentence_length: f64,
}

/// Most frequent content words, highest count first.
///
/// Equal counts keep the order in which the words first appeared.
/// Serializes as a JSON object in that order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TopWords(Vec<(String, usize)>);

impl TopWords {
    pub fn get(&self, word: &str) -> Option<usize> {
        self.0.iter().find(|(w, _)| w == word).map(|(_, c)| *c)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(word, count)| (word.as_str(), *count))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TopWords {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(word, count)| (word, count)))
    }
}

/// Word-frequency, theme, and pattern analysis.
///
/// The stopword set and theme table are fixed at construction; the analyzer
/// holds no other state and can be shared across threads.
#[derive(Debug, Clone)]
pub struct TextAnalyzer {
    config: AnalyzerConfig,
    tokenizer: Tokenizer,
    stopwords: StopwordSet,
}

impl TextAnalyzer {
    /// Creates an analyzer with English stopwords and the built-in themes.
    pub fn new() -> Self {
        Self::with_config(AnalyzerConfig::default())
    }

    /// Creates an analyzer with a custom configuration.
    ///
    /// # Example
    ///
    /// ```rust
    /// use gleaner_core::{AnalyzerConfig, TextAnalyzer};
    ///
    /// let config = AnalyzerConfig::builder().extra_stopwords(["rust"]).build();
    /// let analyzer = TextAnalyzer::with_config(config);
    /// let result = analyzer.analyze_text("Rust compilers compile Rust").unwrap();
    /// assert_eq!(result.top_words.get("rust"), None);
    /// ```
    pub fn with_config(config: AnalyzerConfig) -> Self {
        let stopwords = config.stopwords.with_extra(&config.extra_stopwords);
        Self { config, tokenizer: Tokenizer::new(), stopwords }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Analyzes `text` and returns statistics, themes, patterns, and top words.
    ///
    /// # Errors
    ///
    /// Returns [`GleanerError::EmptyInput`] when `text` is empty.
    pub fn analyze_text(&self, text: &str) -> Result<AnalysisResult> {
        if text.is_empty() {
            return Err(GleanerError::EmptyInput("No text provided for analysis".to_string()));
        }

        let lower = text.to_lowercase();
        let tokens = self.tokenizer.tokenize(&lower);

        let statistics = statistics(&tokens);
        let top_words = self.top_words(&tokens);
        let themes = self.config.themes.score(&lower);
        let language_patterns = language_patterns(text);

        tracing::debug!(
            total_words = statistics.total_words,
            top_words = top_words.len(),
            "analyzed text"
        );

        Ok(AnalysisResult { statistics, themes, language_patterns, top_words })
    }

    /// Finds whole-word, case-insensitive occurrences of `term` in `text`.
    ///
    /// See [`search_content`] for details; the context radius comes from the
    /// analyzer's configuration.
    pub fn search_content(&self, text: &str, term: &str) -> Result<SearchResult> {
        search_content(text, term, self.config.context_radius)
    }

    fn top_words(&self, tokens: &[String]) -> TopWords {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for token in tokens {
            if !is_alphanumeric(token) || self.stopwords.contains(token) {
                continue;
            }
            match index.get(token.as_str()) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(token.as_str(), counts.len());
                    counts.push((token.clone(), 1));
                }
            }
        }

        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(self.config.top_words_limit);

        TopWords(counts)
    }
}

impl Default for TextAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

fn statistics(tokens: &[String]) -> Statistics {
    let total_words = tokens.len();
    let unique_words = tokens.iter().collect::<HashSet<_>>().len();
    let average_word_length = if total_words > 0 {
        tokens.iter().map(|t| t.chars().count()).sum::<usize>() as f64 / total_words as f64
    } else {
        0.0
    };

    Statistics { total_words, unique_words, average_word_length }
}

fn language_patterns(text: &str) -> LanguagePatterns {
    let sentence_count = SENTENCE_END.find_iter(text).count();
    let average_sentence_length = if sentence_count > 0 {
        text.split_whitespace().count() as f64 / sentence_count as f64
    } else {
        0.0
    };

    LanguagePatterns {
        question_count: QUESTION.find_iter(text).count(),
        exclamation_count: EXCLAMATION.find_iter(text).count(),
        sentence_count,
        paragraph_count: PARAGRAPH_BREAK.find_iter(text).count() + 1,
        average_sentence_length,
    }
}
