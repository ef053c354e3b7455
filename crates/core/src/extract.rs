//! Readable-text extraction.
//!
//! Raw HTML goes through [`preprocess_html`], the best content container is
//! chosen with [`score_candidates`], and that container is rendered to plain
//! text with one line per block element. Table rows become ` | `-joined cells.

use scraper::{ElementRef, Node};

use crate::parse::{Document, Element};
use crate::preprocess::{PreprocessConfig, preprocess_html};
use crate::scoring::{ScoreConfig, score_candidates, top_candidate};
use crate::{GleanerError, Result};

/// Tags that start a new line in rendered text
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "blockquote", "br", "dd", "details", "div", "dl", "dt", "figcaption", "figure", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "ol", "p", "pre", "section", "summary", "table", "tbody",
    "thead", "tfoot", "ul",
];

/// Configuration for content extraction
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Render `<table>` content as ` | `-joined rows
    pub include_tables: bool,
    /// Keep user comment sections
    pub include_comments: bool,
    /// Minimum paragraph length (chars) considered during scoring
    pub min_paragraph_len: usize,
    /// Top candidates scoring below this fall back to the whole body
    pub min_score: f64,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { include_tables: true, include_comments: false, min_paragraph_len: 25, min_score: 5.0 }
    }
}

/// Extract readable plain text from an HTML page.
///
/// # Errors
///
/// Returns [`GleanerError::NoContent`] when nothing readable remains.
///
/// # Example
///
/// ```rust
/// use gleaner_core::{ExtractConfig, extract_text};
///
/// let html = r#"<html><body><nav>Menu</nav><article>
///     <h1>Title</h1>
///     <p>The body of the article is long enough, and it has commas, to be chosen.</p>
/// </article></body></html>"#;
///
/// let text = extract_text(html, &ExtractConfig::default()).unwrap();
/// assert_eq!(text, "Title\nThe body of the article is long enough, and it has commas, to be chosen.");
/// ```
pub fn extract_text(html: &str, config: &ExtractConfig) -> Result<String> {
    let preprocess = PreprocessConfig {
        remove_boilerplate: true,
        keep_tables: config.include_tables,
        keep_comment_sections: config.include_comments,
    };
    let cleaned = preprocess_html(html, &preprocess);
    let doc = Document::parse(&cleaned);

    let score_config = ScoreConfig { min_paragraph_len: config.min_paragraph_len, ..Default::default() };
    let candidates = score_candidates(&doc, &score_config);

    let root: Option<Element<'_>> = match top_candidate(&candidates) {
        Some(top) if top.score >= config.min_score => {
            tracing::debug!(tag = %top.element.tag_name(), score = top.score, "selected content container");
            Some(top.element.clone())
        }
        _ => {
            tracing::debug!(candidates = candidates.len(), "no container above threshold, using body");
            doc.body()
        }
    };

    let text = root.map(|el| render_text(el.element_ref())).unwrap_or_default();

    if text.is_empty() { Err(GleanerError::NoContent) } else { Ok(text) }
}

/// Render an element subtree to newline-separated plain text.
pub fn render_text(root: ElementRef<'_>) -> String {
    let mut out = TextBuilder::default();
    walk(root, &mut out);
    out.finish()
}

#[derive(Default)]
struct TextBuilder {
    lines: Vec<String>,
    current: String,
}

impl TextBuilder {
    fn push_str(&mut self, text: &str) {
        self.current.push_str(text);
    }

    fn break_line(&mut self) {
        let line = self.current.split_whitespace().collect::<Vec<_>>().join(" ");
        if !line.is_empty() {
            self.lines.push(line);
        }
        self.current.clear();
    }

    fn push_line(&mut self, line: String) {
        self.break_line();
        if !line.is_empty() {
            self.lines.push(line);
        }
    }

    fn finish(mut self) -> String {
        self.break_line();
        self.lines.join("\n")
    }
}

fn walk(element: ElementRef<'_>, out: &mut TextBuilder) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let tag = child_el.value().name();

                if tag == "tr" {
                    out.push_line(render_row(child_el));
                } else if tag == "pre" {
                    out.break_line();
                    let text: String = child_el.text().collect();
                    for line in text.lines().map(str::trim_end).filter(|l| !l.trim().is_empty()) {
                        out.push_line(line.to_string());
                    }
                } else if BLOCK_TAGS.contains(&tag) {
                    out.break_line();
                    walk(child_el, out);
                    out.break_line();
                } else {
                    walk(child_el, out);
                }
            }
            _ => {}
        }
    }
}

fn render_row(row: ElementRef<'_>) -> String {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "td" | "th"))
        .map(|cell| cell.text().collect::<String>().split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}
