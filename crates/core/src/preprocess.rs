use std::sync::LazyLock;

use regex::Regex;

/// Tags that never carry readable page content.
const BOILERPLATE_TAGS: &[&str] = &[
    "script", "style", "noscript", "iframe", "svg", "canvas", "nav", "footer", "aside", "form",
];

static HTML_COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());

/// id/class tokens of user comment sections, e.g. `comments`, `reply-list`, `disqus_thread`
static COMMENT_SECTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(comments?|disqus|respond|reply)([-_]|$)").unwrap());

/// Configuration for HTML preprocessing
#[derive(Debug, Clone)]
pub struct PreprocessConfig {
    /// Whether to drop nav/footer/aside/form along with script-like tags
    pub remove_boilerplate: bool,
    /// Whether to keep `<table>` elements
    pub keep_tables: bool,
    /// Whether to keep user comment sections
    pub keep_comment_sections: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self { remove_boilerplate: true, keep_tables: true, keep_comment_sections: false }
    }
}

/// Preprocess HTML by removing markup comments and elements that are not page content
pub fn preprocess_html(html: &str, config: &PreprocessConfig) -> String {
    let without_comments = HTML_COMMENT.replace_all(html, "");
    remove_elements(&without_comments, config)
}

fn remove_elements(html: &str, config: &PreprocessConfig) -> String {
    let mut handlers = Vec::new();

    if config.remove_boilerplate {
        for tag in BOILERPLATE_TAGS {
            handlers.push(lol_html::element!(*tag, |el| {
                el.remove();
                Ok(())
            }));
        }
    }

    if !config.keep_tables {
        handlers.push(lol_html::element!("table", |el| {
            el.remove();
            Ok(())
        }));
    }

    if !config.keep_comment_sections {
        handlers.push(lol_html::element!("*", |el| {
            let is_comment_section = el.get_attribute("id").is_some_and(|id| COMMENT_SECTION.is_match(&id))
                || el
                    .get_attribute("class")
                    .is_some_and(|class| class.split_whitespace().any(|c| COMMENT_SECTION.is_match(c)));
            if is_comment_section {
                el.remove();
            }
            Ok(())
        }));
    }

    if handlers.is_empty() {
        return html.to_string();
    }

    let mut output: Vec<u8> = Vec::with_capacity(html.len());
    let mut rewriter = lol_html::HtmlRewriter::new(
        lol_html::Settings { element_content_handlers: handlers, ..Default::default() },
        |c: &[u8]| output.extend_from_slice(c),
    );

    if let Err(e) = rewriter.write(html.as_bytes()) {
        tracing::debug!(error = %e, "html rewrite failed, keeping original markup");
        return html.to_string();
    }

    if let Err(e) = rewriter.end() {
        tracing::debug!(error = %e, "html rewrite failed, keeping original markup");
        return html.to_string();
    }

    if output.is_empty() { html.to_string() } else { String::from_utf8_lossy(&output).into_owned() }
}
