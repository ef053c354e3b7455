use std::fmt::Write;

use crate::analyzer::AnalysisResult;
use crate::search::SearchResult;

/// Configuration for plain text reports
#[derive(Debug, Clone)]
pub struct TextConfig {
    /// Width of the label column
    pub label_width: usize,
    /// Include themes that scored zero
    pub show_zero_themes: bool,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self { label_width: 22, show_zero_themes: true }
    }
}

/// Plain text formatter for analysis and search results
pub struct TextFormatter {
    config: TextConfig,
}

impl TextFormatter {
    pub fn new(config: TextConfig) -> Self {
        Self { config }
    }

    pub fn analysis(&self, result: &AnalysisResult) -> String {
        analysis_to_text(result, &self.config)
    }

    pub fn search(&self, result: &SearchResult) -> String {
        search_to_text(result)
    }
}

/// Render an analysis as a sectioned report
pub fn analysis_to_text(result: &AnalysisResult, config: &TextConfig) -> String {
    let w = config.label_width;
    let mut out = String::new();

    let stats = &result.statistics;
    let _ = writeln!(out, "Statistics");
    let _ = writeln!(out, "  {:<w$}{}", "Total words:", stats.total_words);
    let _ = writeln!(out, "  {:<w$}{}", "Unique words:", stats.unique_words);
    let _ = writeln!(out, "  {:<w$}{:.2}", "Average word length:", stats.average_word_length);

    let _ = writeln!(out, "\nThemes");
    for (name, score) in result.themes.iter() {
        if score == 0.0 && !config.show_zero_themes {
            continue;
        }
        let _ = writeln!(out, "  {:<w$}{:>5.1}%", name, score * 100.0);
    }

    let patterns = &result.language_patterns;
    let _ = writeln!(out, "\nLanguage patterns");
    let _ = writeln!(out, "  {:<w$}{}", "Questions:", patterns.question_count);
    let _ = writeln!(out, "  {:<w$}{}", "Exclamations:", patterns.exclamation_count);
    let _ = writeln!(out, "  {:<w$}{}", "Sentences:", patterns.sentence_count);
    let _ = writeln!(out, "  {:<w$}{}", "Paragraphs:", patterns.paragraph_count);
    let _ = writeln!(out, "  {:<w$}{:.2}", "Avg sentence length:", patterns.average_sentence_length);

    let _ = writeln!(out, "\nTop words");
    if result.top_words.is_empty() {
        let _ = writeln!(out, "  (none)");
    }
    for (word, count) in result.top_words.iter() {
        let _ = writeln!(out, "  {:<w$}{}", word, count);
    }

    out.trim_end().to_string()
}

/// Render search matches, one context per line
pub fn search_to_text(result: &SearchResult) -> String {
    match result {
        SearchResult::NoMatches { message } => message.clone(),
        SearchResult::Matches { total_matches, contexts } => {
            let mut out = String::new();
            let noun = if *total_matches == 1 { "match" } else { "matches" };
            let _ = writeln!(out, "{} {}", total_matches, noun);
            for ctx in contexts {
                let context = ctx.context.split_whitespace().collect::<Vec<_>>().join(" ");
                let _ = writeln!(out, "  [{}] ...{}...", ctx.position, context);
            }
            out.trim_end().to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TextAnalyzer, search_content};

    #[test]
    fn test_analysis_report_sections() {
        let result = TextAnalyzer::new().analyze_text("Green gardens. Green roofs?").unwrap();
        let report = analysis_to_text(&result, &TextConfig::default());

        assert!(report.starts_with("Statistics\n"));
        assert!(report.contains("\nThemes\n"));
        assert!(report.contains("sustainability"));
        assert!(report.contains("100.0%"));
        assert!(report.contains("Questions:"));
        assert!(report.contains("\nTop words\n"));
        assert!(report.contains("green"));
    }

    #[test]
    fn test_hide_zero_themes() {
        let result = TextAnalyzer::new().analyze_text("Green gardens.").unwrap();
        let config = TextConfig { show_zero_themes: false, ..Default::default() };
        let report = analysis_to_text(&result, &config);

        assert!(report.contains("sustainability"));
        assert!(!report.contains("community"));
    }

    #[test]
    fn test_search_report() {
        let result = search_content("one\ntwo one", "one", 100).unwrap();
        let report = search_to_text(&result);
        assert!(report.starts_with("2 matches\n"));
        assert!(report.contains("[0] ...one two one..."));

        let none = search_content("one", "two", 100).unwrap();
        assert_eq!(search_to_text(&none), "No exact matches found for 'two'");
    }
}
