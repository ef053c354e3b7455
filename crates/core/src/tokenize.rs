//! Word tokenization and stopword filtering.
//!
//! The tokenizer follows treebank conventions closely enough for frequency
//! counting: punctuation becomes separate tokens, hyphenated and dotted words
//! stay whole, and negative contractions split as `do` + `n't`.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w+(?:[-.]\w+)*|'\w+|[^\w\s]").unwrap());

/// Regex-based word tokenizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Split `text` into tokens in source order.
    ///
    /// Case is preserved; callers lower-case first when they need to.
    ///
    /// ```rust
    /// use gleaner_core::Tokenizer;
    ///
    /// let tokens = Tokenizer::new().tokenize("it's hassle-free, isn't it?");
    /// assert_eq!(tokens, ["it", "'s", "hassle-free", ",", "is", "n't", "it", "?"]);
    /// ```
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens: Vec<String> = Vec::new();

        for m in TOKEN_PATTERN.find_iter(text) {
            let token = m.as_str();
            if token.eq_ignore_ascii_case("'t")
                && let Some(prev) = tokens.last_mut()
                && prev.len() > 1
                && (prev.ends_with('n') || prev.ends_with('N'))
            {
                let n = prev.split_off(prev.len() - 1);
                tokens.push(format!("{}{}", n, token));
                continue;
            }
            tokens.push(token.to_string());
        }

        tokens
    }
}

/// True when `token` is non-empty and every character is alphanumeric.
pub fn is_alphanumeric(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphanumeric)
}

/// Immutable set of words excluded from frequency counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// English stopwords from the `stop-words` crate.
    pub fn english() -> Self {
        Self::from_words(stop_words::get(stop_words::LANGUAGE::English))
    }

    /// Build a set from any list of words; entries are lower-cased.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self { words: words.into_iter().map(|w| w.as_ref().to_lowercase()).collect() }
    }

    /// A copy of this set with `extra` words added.
    pub fn with_extra<I, S>(&self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words = self.words.clone();
        words.extend(extra.into_iter().map(|w| w.as_ref().to_lowercase()));
        Self { words }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for StopwordSet {
    fn default() -> Self {
        Self::english()
    }
}
