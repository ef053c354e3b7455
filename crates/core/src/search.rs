//! Whole-word term search with surrounding context.

use regex::RegexBuilder;
use serde::Serialize;

use crate::{GleanerError, Result};

/// Outcome of [`search_content`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    /// The term does not occur as a whole word.
    NoMatches { message: String },
    /// One context per occurrence, in text order.
    Matches { total_matches: usize, contexts: Vec<MatchContext> },
}

impl SearchResult {
    pub fn total_matches(&self) -> usize {
        match self {
            SearchResult::NoMatches { .. } => 0,
            SearchResult::Matches { total_matches, .. } => *total_matches,
        }
    }
}

/// A slice of text around one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchContext {
    pub context: String,
    /// Character offset of the match start.
    pub position: usize,
}

/// Finds whole-word, case-insensitive occurrences of `term` in `text`.
///
/// The term is matched literally; regex metacharacters are escaped. Each
/// match carries up to `radius` characters on either side, clipped at the
/// text bounds. Positions and the radius count characters, not bytes.
///
/// # Errors
///
/// Returns [`GleanerError::EmptyInput`] when `text` or `term` is empty, and
/// [`GleanerError::Search`] if the pattern cannot be compiled.
///
/// # Example
///
/// ```rust
/// use gleaner_core::search_content;
///
/// let result = search_content("Green roofs. Greenery is not green-ish? GREEN!", "green", 100).unwrap();
/// assert_eq!(result.total_matches(), 3);
/// ```
pub fn search_content(text: &str, term: &str, radius: usize) -> Result<SearchResult> {
    if text.is_empty() || term.is_empty() {
        return Err(GleanerError::EmptyInput("No text or search term provided".to_string()));
    }

    let pattern = format!(r"\b{}\b", regex::escape(term));
    let regex = RegexBuilder::new(&pattern).case_insensitive(true).build().map_err(|e| {
        tracing::error!(term, error = %e, "Error searching content");
        GleanerError::Search(e.to_string())
    })?;

    // boundaries[i] is the byte offset of char i; the last entry is text.len()
    let boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).chain(std::iter::once(text.len())).collect();
    let char_count = boundaries.len() - 1;
    let char_at = |byte: usize| boundaries.binary_search(&byte).unwrap_or_else(|i| i);

    let contexts: Vec<MatchContext> = regex
        .find_iter(text)
        .map(|m| {
            let start = char_at(m.start());
            let end = char_at(m.end());
            let from = start.saturating_sub(radius);
            let to = (end + radius).min(char_count);
            MatchContext { context: text[boundaries[from]..boundaries[to]].to_string(), position: start }
        })
        .collect();

    if contexts.is_empty() {
        return Ok(SearchResult::NoMatches { message: format!("No exact matches found for '{}'", term) });
    }

    Ok(SearchResult::Matches { total_matches: contexts.len(), contexts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "term")]
    #[case("some text", "")]
    fn test_empty_input(#[case] text: &str, #[case] term: &str) {
        match search_content(text, term, 100) {
            Err(GleanerError::EmptyInput(msg)) => assert_eq!(msg, "No text or search term provided"),
            other => panic!("expected EmptyInput, got {:?}", other),
        }
    }

    #[test]
    fn test_no_matches_message() {
        let result = search_content("Nothing to see here", "garden", 100).unwrap();
        assert_eq!(result, SearchResult::NoMatches { message: "No exact matches found for 'garden'".to_string() });
        assert_eq!(result.total_matches(), 0);
    }

    #[test]
    fn test_whole_word_case_insensitive() {
        let text = "Green roofs. Greenery is not green-ish? GREEN!";
        let SearchResult::Matches { total_matches, contexts } = search_content(text, "green", 100).unwrap() else {
            panic!("expected matches");
        };

        assert_eq!(total_matches, 3);
        let positions: Vec<usize> = contexts.iter().map(|c| c.position).collect();
        assert_eq!(positions, [0, 29, 40]);
        assert!(contexts.iter().all(|c| c.context == text));
    }

    #[test]
    fn test_term_is_literal() {
        let text = "Costs rose (a lot) this year; a.b is not axb.";
        assert_eq!(search_content(text, "a.b", 100).unwrap().total_matches(), 1);
        assert_eq!(search_content(text, "a lot", 100).unwrap().total_matches(), 1);
    }

    #[test]
    fn test_context_window_is_clipped() {
        let text = format!("{}needle{}", "a ".repeat(100), " b".repeat(100));
        let SearchResult::Matches { contexts, .. } = search_content(&text, "needle", 10).unwrap() else {
            panic!("expected matches");
        };

        assert_eq!(contexts[0].position, 200);
        assert_eq!(contexts[0].context, format!("{}needle{}", "a ".repeat(5), " b".repeat(5)));
    }

    #[test]
    fn test_positions_count_characters() {
        let text = "café au lait, café noir";
        let SearchResult::Matches { contexts, .. } = search_content(text, "noir", 3).unwrap() else {
            panic!("expected matches");
        };

        assert_eq!(contexts[0].position, 19);
        assert_eq!(contexts[0].context, "fé noir");
    }

    #[test]
    fn test_serializes_untagged() {
        let result = search_content("one two one", "one", 100).unwrap();
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["total_matches"], 2);
        assert_eq!(json["contexts"][1]["position"], 8);

        let none = serde_json::to_value(search_content("one", "two", 100).unwrap()).unwrap();
        assert_eq!(none, serde_json::json!({ "message": "No exact matches found for 'two'" }));
    }
}
