use serde::Serialize;

use crate::Document;

/// Page metadata; each field is empty when the page does not provide it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Metadata {
    pub title: String,
    pub author: String,
    pub date: String,
    pub description: String,
}

impl Metadata {
    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.author.is_empty() && self.date.is_empty() && self.description.is_empty()
    }
}

impl Document {
    /// Extract title with priority fallback:
    /// 1. JSON-LD `headline`
    /// 2. Open Graph `og:title`
    /// 3. Twitter `twitter:title`
    /// 4. `<title>` element
    /// 5. First `<h1>` element
    pub fn extract_title(&self) -> Option<String> {
        if let Some(headline) = self.json_ld_str("headline") {
            return Some(headline);
        }

        self.get_meta_content("og:title")
            .or_else(|| self.get_meta_content("twitter:title"))
            .or_else(|| self.title())
            .or_else(|| self.first_text("h1"))
    }

    /// Extract author with priority fallback:
    /// 1. JSON-LD `author` (string, object, or first of an array)
    /// 2. Meta `author` / `article:author`
    /// 3. `[rel="author"]` link text
    /// 4. `[itemprop="author"]` text
    /// 5. Short text in an element whose class contains "byline" or "author"
    pub fn extract_author(&self) -> Option<String> {
        if let Some(json_ld) = self.extract_json_ld()
            && let Some(author) = json_ld.get("author")
            && let Some(name) = author_from_json_ld(author)
        {
            return Some(name);
        }

        self.get_meta_content("author")
            .or_else(|| self.get_meta_content("article:author"))
            .or_else(|| self.first_text("[rel=\"author\"]"))
            .or_else(|| self.first_text("[itemprop=\"author\"]"))
            .or_else(|| self.byline())
    }

    /// Extract date with priority fallback:
    /// 1. JSON-LD `datePublished`
    /// 2. Meta `article:published_time`
    /// 3. `<time datetime="">` element
    /// 4. Meta `date`
    pub fn extract_date(&self) -> Option<String> {
        if let Some(date) = self.json_ld_str("datePublished") {
            return Some(date);
        }

        self.get_meta_content("article:published_time")
            .or_else(|| {
                self.select("time[datetime]")
                    .ok()?
                    .first()
                    .and_then(|el| el.attr("datetime"))
                    .map(str::to_string)
            })
            .or_else(|| self.get_meta_content("date"))
    }

    /// Extract description with priority fallback:
    /// 1. JSON-LD `description`
    /// 2. Open Graph `og:description`
    /// 3. Meta `description`
    pub fn extract_description(&self) -> Option<String> {
        if let Some(desc) = self.json_ld_str("description") {
            return Some(desc);
        }

        self.get_meta_content("og:description")
            .or_else(|| self.get_meta_content("description"))
    }

    /// Extract all metadata at once
    pub fn extract_metadata(&self) -> Metadata {
        Metadata {
            title: self.extract_title().unwrap_or_default(),
            author: self.extract_author().unwrap_or_default(),
            date: self.extract_date().unwrap_or_default(),
            description: self.extract_description().unwrap_or_default(),
        }
    }

    /// Get meta tag content by name or property attribute
    fn get_meta_content(&self, attr: &str) -> Option<String> {
        ["name", "property"].iter().find_map(|key| {
            let selector = format!("meta[{}=\"{}\"]", key, attr);
            self.select(&selector)
                .ok()?
                .first()
                .and_then(|el| el.attr("content"))
                .map(str::trim)
                .filter(|content| !content.is_empty())
                .map(str::to_string)
        })
    }

    fn first_text(&self, selector: &str) -> Option<String> {
        self.select(selector)
            .ok()?
            .first()
            .map(|el| el.stripped_text())
            .filter(|text| !text.is_empty())
    }

    fn byline(&self) -> Option<String> {
        for selector in ["[class*=\"byline\"]", "[class*=\"author\"]"] {
            let Ok(elements) = self.select(selector) else {
                continue;
            };
            for el in elements.iter().take(3) {
                let text = el.stripped_text();
                if !text.is_empty() && text.chars().count() < 100 {
                    return Some(text);
                }
            }
        }
        None
    }

    fn json_ld_str(&self, key: &str) -> Option<String> {
        self.extract_json_ld()?.get(key)?.as_str().map(str::to_string)
    }

    /// First JSON-LD block that parses as an object
    fn extract_json_ld(&self) -> Option<serde_json::Value> {
        let elements = self.select("script[type=\"application/ld+json\"]").ok()?;
        elements.iter().find_map(|el| {
            serde_json::from_str::<serde_json::Value>(el.text().trim())
                .ok()
                .filter(serde_json::Value::is_object)
        })
    }
}

/// Author name from a JSON-LD `author` field; handles string, object, and array forms
fn author_from_json_ld(author: &serde_json::Value) -> Option<String> {
    if let Some(name) = author.as_str() {
        return Some(name.to_string());
    }

    if let Some(name) = author.get("name").and_then(|n| n.as_str()) {
        return Some(name.to_string());
    }

    author.as_array()?.first().and_then(author_from_json_ld)
}
