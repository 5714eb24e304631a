use std::fs;
use std::path::Path;

use crate::config::{self, CategoryConfig, ConfigError, MatchMode};

/// A category with its keyword list loaded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub weight: i64,
    pub mode: MatchMode,
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(
        name: impl Into<String>,
        weight: i64,
        mode: MatchMode,
        keywords: Vec<String>,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            mode,
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
        }
    }

    /// Category matched against title and summary
    pub fn text(name: impl Into<String>, weight: i64, keywords: &[&str]) -> Self {
        Self::new(name, weight, MatchMode::Text, owned_keywords(keywords))
    }

    /// Category matched against the source name
    pub fn source(name: impl Into<String>, weight: i64, keywords: &[&str]) -> Self {
        Self::new(name, weight, MatchMode::Source, owned_keywords(keywords))
    }
}

fn owned_keywords(keywords: &[&str]) -> Vec<String> {
    keywords.iter().map(|k| k.to_string()).collect()
}

/// Read-only keyword lists for one run, in scoring order
#[derive(Debug, Clone)]
pub struct KeywordStore {
    categories: Vec<Category>,
}

impl KeywordStore {
    /// Build a store from already-loaded categories
    pub fn new(categories: Vec<Category>) -> Result<Self, ConfigError> {
        config::validate_names(categories.iter().map(|c| c.name.as_str()))?;
        Ok(Self { categories })
    }

    /// Load every category's keyword file. Relative paths resolve against `root`.
    pub fn load(config: &CategoryConfig, root: &Path) -> Result<Self, ConfigError> {
        let categories = config
            .categories
            .iter()
            .map(|entry| {
                let path = root.join(&entry.path);
                let keywords = load_keywords(&path);
                tracing::debug!(
                    category = %entry.name,
                    path = %path.display(),
                    count = keywords.len(),
                    "loaded keywords"
                );
                Category {
                    name: entry.name.clone(),
                    weight: entry.weight,
                    mode: entry.mode,
                    keywords,
                }
            })
            .collect();

        Self::new(categories)
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    pub fn keyword_count(&self) -> usize {
        self.categories.iter().map(|c| c.keywords.len()).sum()
    }
}

/// Load a keyword file, one keyword per line.
///
/// A missing or unreadable file gives an empty list so an incomplete keyword
/// set never blocks scoring.
pub fn load_keywords(path: &Path) -> Vec<String> {
    match fs::read_to_string(path) {
        Ok(content) => parse_keywords(&content),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "keyword list unavailable, using empty list"
            );
            Vec::new()
        }
    }
}

pub fn parse_keywords(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect()
}
