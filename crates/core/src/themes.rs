use std::collections::HashSet;

use serde::ser::{Serialize, Serializer};

use crate::{GleanerError, Result};

/// Built-in themes and their keyword lists, in report order.
pub const BUILTIN_THEMES: &[(&str, &[&str])] = &[
    ("community", &["community", "social", "shared", "together", "connect", "interact", "neighbors"]),
    ("convenience", &["convenient", "easy", "simple", "quick", "fast", "efficient", "hassle-free"]),
    ("location", &["location", "area", "neighborhood", "district", "zone", "region", "place"]),
    ("amenities", &["amenities", "features", "facilities", "services", "utilities", "included"]),
    ("lifestyle", &["lifestyle", "living", "experience", "quality", "comfort", "enjoy", "relax"]),
    ("sustainability", &["sustainable", "eco-friendly", "green", "environmental", "energy", "recycle"]),
];

/// A named category with its keyword list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Ordered, immutable table of themes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTable {
    themes: Vec<Theme>,
}

impl ThemeTable {
    /// Build a table from `(name, keywords)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`GleanerError::Analysis`] for an empty or duplicate theme name,
    /// or an empty keyword (which would match every text).
    pub fn new<N, K, I>(themes: impl IntoIterator<Item = (N, I)>) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut table = Vec::new();

        for (name, keywords) in themes {
            let name = name.into();
            if name.trim().is_empty() {
                return Err(GleanerError::Analysis("theme name must not be empty".to_string()));
            }
            if !seen.insert(name.clone()) {
                return Err(GleanerError::Analysis(format!("duplicate theme '{}'", name)));
            }

            let keywords: Vec<String> = keywords.into_iter().map(|k| k.into().to_lowercase()).collect();
            if keywords.iter().any(String::is_empty) {
                return Err(GleanerError::Analysis(format!("theme '{}' has an empty keyword", name)));
            }

            table.push(Theme { name, keywords });
        }

        Ok(Self { themes: table })
    }

    pub fn themes(&self) -> &[Theme] {
        &self.themes
    }

    /// Score `lower_text` against every theme.
    ///
    /// Each theme's raw score is the number of its keywords that occur as a
    /// substring of the text; repeats of one keyword count once. Raw scores
    /// are divided by their sum, or left at zero when nothing matched.
    pub fn score(&self, lower_text: &str) -> ThemeScores {
        let counts: Vec<(String, usize)> = self
            .themes
            .iter()
            .map(|theme| {
                let matches = theme.keywords.iter().filter(|k| lower_text.contains(k.as_str())).count();
                (theme.name.clone(), matches)
            })
            .collect();

        let total: usize = counts.iter().map(|(_, c)| c).sum();

        let scores = counts
            .into_iter()
            .map(|(name, count)| {
                let score = if total > 0 { count as f64 / total as f64 } else { count as f64 };
                (name, score)
            })
            .collect();

        ThemeScores(scores)
    }
}

impl Default for ThemeTable {
    fn default() -> Self {
        Self {
            themes: BUILTIN_THEMES
                .iter()
                .map(|(name, keywords)| Theme {
                    name: name.to_string(),
                    keywords: keywords.iter().map(|k| k.to_string()).collect(),
                })
                .collect(),
        }
    }
}

/// Normalized theme scores in table order; serializes as a JSON object.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ThemeScores(Vec<(String, f64)>);

impl ThemeScores {
    pub fn get(&self, theme: &str) -> Option<f64> {
        self.0.iter().find(|(name, _)| name == theme).map(|(_, s)| *s)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(name, score)| (name.as_str(), *score))
    }

    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, s)| s).sum()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ThemeScores {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(name, score)| (name, score)))
    }
}
