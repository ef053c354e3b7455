use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::parse::{Document, Element};

/// Elements whose text is scored and credited to their ancestors
const PARAGRAPH_TAGS: &str = "p, pre, td, blockquote";

/// Positive patterns that suggest an element contains main content
static POSITIVE_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(article|body|content|entry|hentry|h-entry|main|page|post|text|blog|story)").unwrap()
});

/// Negative patterns that suggest an element does NOT contain main content
static NEGATIVE_PATTERNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(banner|breadcrumbs?|combx|comment|disqus|extra|foot|header|menu|related|remark|rss|shoutbox|sidebar|sponsor|ad-break|agegate|pagination|pager|popup|share|social)").unwrap()
});

/// Configuration for content scoring
#[derive(Debug, Clone)]
pub struct ScoreConfig {
    /// Weight for positive class/ID patterns
    pub positive_weight: f64,
    /// Weight for negative class/ID patterns
    pub negative_weight: f64,
    /// Paragraphs shorter than this (in chars) are ignored
    pub min_paragraph_len: usize,
    /// Characters per length point
    pub chars_per_point: usize,
    /// Cap on length points per paragraph
    pub max_length_points: f64,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            positive_weight: 25.0,
            negative_weight: -25.0,
            min_paragraph_len: 25,
            chars_per_point: 100,
            max_length_points: 3.0,
        }
    }
}

/// A scored content container
#[derive(Debug, Clone)]
pub struct Candidate<'a> {
    pub element: Element<'a>,
    pub score: f64,
}

/// Base score for a container by tag name
///
/// - ARTICLE: +10, MAIN: +8, SECTION: +8
/// - DIV: +5
/// - TD, BLOCKQUOTE: +3
/// - FORM, lists: -3
/// - headings, header/footer/nav: -5
pub fn base_tag_score(tag_name: &str) -> f64 {
    match tag_name {
        "article" => 10.0,
        "main" | "section" => 8.0,
        "div" => 5.0,
        "td" | "blockquote" => 3.0,
        "form" | "address" | "ol" | "ul" | "dl" | "dd" | "dt" | "li" => -3.0,
        "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "th" | "header" | "footer" | "nav" => -5.0,
        _ => 0.0,
    }
}

/// Class/ID weight adjustment for an element
///
/// The id is checked before the class list; positive patterns win over negative ones.
pub fn class_id_weight(element: &Element<'_>, config: &ScoreConfig) -> f64 {
    let id = element.attr("id").into_iter();
    let classes = element.attr("class").into_iter().flat_map(str::split_whitespace);

    for name in id.chain(classes) {
        if POSITIVE_PATTERNS.is_match(name) {
            return config.positive_weight;
        }
        if NEGATIVE_PATTERNS.is_match(name) {
            return config.negative_weight;
        }
    }

    0.0
}

/// Ratio of link text characters to total text characters (0.0 to 1.0)
pub fn link_density(element: &Element<'_>) -> f64 {
    let text_length = element.text().chars().count();

    if text_length == 0 {
        return 0.0;
    }

    let link_text_length = element
        .select("a")
        .unwrap_or_default()
        .iter()
        .map(|link| link.text().chars().count())
        .sum::<usize>();

    (link_text_length as f64 / text_length as f64).min(1.0)
}

/// Score of a single paragraph's text: one point, plus one per comma, plus
/// one per `chars_per_point` characters (capped).
pub fn paragraph_score(text: &str, config: &ScoreConfig) -> f64 {
    let length_points = (text.chars().count() / config.chars_per_point.max(1)) as f64;
    let commas = text.matches(',').count() as f64;

    1.0 + commas + length_points.min(config.max_length_points)
}

/// Score every container that holds a qualifying paragraph.
///
/// Each paragraph credits its full score to its parent and half to its
/// grandparent. Containers start from their tag and class/ID weights, and the
/// total is scaled by `1 - link_density`. Candidates are returned in the order
/// they were first credited.
pub fn score_candidates<'a>(doc: &'a Document, config: &ScoreConfig) -> Vec<Candidate<'a>> {
    let Ok(paragraphs) = doc.select(PARAGRAPH_TAGS) else {
        return Vec::new();
    };

    let mut scored: Vec<(ElementRef<'a>, f64)> = Vec::new();

    for paragraph in paragraphs {
        let text = paragraph.stripped_text();
        if text.chars().count() < config.min_paragraph_len {
            continue;
        }
        let score = paragraph_score(&text, config);

        let Some(parent) = parent_element(paragraph.element_ref()) else {
            continue;
        };
        credit(&mut scored, parent, score, config);

        if let Some(grandparent) = parent_element(parent) {
            credit(&mut scored, grandparent, score / 2.0, config);
        }
    }

    scored
        .into_iter()
        .map(|(el, raw)| {
            let element = Element::from(el);
            let score = raw * (1.0 - link_density(&element));
            Candidate { element, score }
        })
        .collect()
}

/// Highest scoring candidate; ties keep the earliest.
pub fn top_candidate<'c, 'a>(candidates: &'c [Candidate<'a>]) -> Option<&'c Candidate<'a>> {
    candidates.iter().fold(None, |best: Option<&Candidate<'a>>, c| match best {
        Some(b) if b.score >= c.score => Some(b),
        _ => Some(c),
    })
}

fn credit<'a>(scored: &mut Vec<(ElementRef<'a>, f64)>, el: ElementRef<'a>, amount: f64, config: &ScoreConfig) {
    if let Some((_, score)) = scored.iter_mut().find(|(seen, _)| *seen == el) {
        *score += amount;
        return;
    }

    let element = Element::from(el);
    let initial = base_tag_score(&element.tag_name()) + class_id_weight(&element, config);
    scored.push((el, initial + amount));
}

fn parent_element(el: ElementRef<'_>) -> Option<ElementRef<'_>> {
    el.parent().and_then(ElementRef::wrap)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(doc: &'a Document, selector: &str) -> Element<'a> {
        doc.select(selector).unwrap().into_iter().next().unwrap()
    }

    #[test]
    fn test_base_tag_score() {
        assert_eq!(base_tag_score("article"), 10.0);
        assert_eq!(base_tag_score("section"), 8.0);
        assert_eq!(base_tag_score("div"), 5.0);
        assert_eq!(base_tag_score("td"), 3.0);
        assert_eq!(base_tag_score("ul"), -3.0);
        assert_eq!(base_tag_score("nav"), -5.0);
        assert_eq!(base_tag_score("span"), 0.0);
    }

    #[test]
    fn test_class_weight_positive() {
        let doc = Document::parse(r#"<div class="article-content">Content</div>"#);
        let config = ScoreConfig::default();
        assert_eq!(class_id_weight(&first(&doc, "div"), &config), 25.0);
    }

    #[test]
    fn test_class_weight_negative() {
        let doc = Document::parse(r#"<div class="sidebar">Content</div>"#);
        let config = ScoreConfig::default();
        assert_eq!(class_id_weight(&first(&doc, "div"), &config), -25.0);
    }

    #[test]
    fn test_class_weight_id_checked_first() {
        let doc = Document::parse(r#"<div id="main-content" class="sidebar">Content</div>"#);
        let config = ScoreConfig::default();
        assert_eq!(class_id_weight(&first(&doc, "div"), &config), 25.0);
    }

    #[test]
    fn test_class_weight_no_match() {
        let doc = Document::parse(r#"<div class="container" id="wrapper">Content</div>"#);
        let config = ScoreConfig::default();
        assert_eq!(class_id_weight(&first(&doc, "div"), &config), 0.0);
    }

    #[test]
    fn test_link_density() {
        let doc = Document::parse(r#"<div id="a"><a href="/">link</a>text</div><div id="b"></div>"#);
        assert_eq!(link_density(&first(&doc, "#a")), 0.5);
        assert_eq!(link_density(&first(&doc, "#b")), 0.0);
    }

    #[test]
    fn test_paragraph_score() {
        let config = ScoreConfig::default();
        assert_eq!(paragraph_score("short", &config), 1.0);
        assert_eq!(paragraph_score("a, b, c", &config), 3.0);
        let long = "x".repeat(1000);
        assert_eq!(paragraph_score(&long, &config), 4.0);
    }

    #[test]
    fn test_article_outscores_sidebar() {
        let html = r#"
            <html><body>
                <div class="sidebar">
                    <p>Sidebar paragraph with just enough words, to count.</p>
                </div>
                <article class="post">
                    <p>The first paragraph of the story has several clauses, commas, and plenty of words.</p>
                    <p>A second paragraph follows, adding more text, more commas, and more weight.</p>
                </article>
            </body></html>
        "#;
        let doc = Document::parse(html);
        let candidates = score_candidates(&doc, &ScoreConfig::default());
        let top = top_candidate(&candidates).unwrap();

        assert_eq!(top.element.tag_name(), "article");
        assert!(top.score > 25.0);
    }

    #[test]
    fn test_short_paragraphs_are_ignored() {
        let doc = Document::parse("<div><p>tiny</p></div>");
        let candidates = score_candidates(&doc, &ScoreConfig::default());
        assert!(candidates.is_empty());
        assert!(top_candidate(&candidates).is_none());
    }
}
