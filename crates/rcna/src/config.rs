use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const KEYWORD_DIR_VAR: &str = "RCNA_KEYWORD_DIR";
pub const CATEGORIES_VAR: &str = "RCNA_CATEGORIES";
pub const DEFAULT_KEYWORD_DIR: &str = "Keywords";

/// Category names the scoring rules refer to directly
pub mod names {
    pub const ORG_TECH: &str = "org_tech";
    pub const ICS: &str = "ics_keywords";
    pub const BUSINESS_PARTNERS: &str = "business_partners";
    pub const THREAT_INTEL: &str = "threat_intel";
    pub const EXPLOIT: &str = "exploit_keywords";
    pub const TRUSTED_SOURCES: &str = "trusted_sources";
    pub const LOW_PRIORITY: &str = "low_priority";
    pub const GEO: &str = "geo_keywords";
    pub const THREAT_ACTOR: &str = "threat_actor_keywords";
    pub const SEVERITY: &str = "severity_keywords";
    pub const TTP: &str = "ttp_keywords";
    pub const CROWN_JEWEL: &str = "crown_jewel_keywords";

    /// Evidence key for the ransomware override
    pub const RANSOM_OVERRIDE: &str = "ransom_override";

    /// Every category the override rule and risk matrix read
    pub const REQUIRED: [&str; 7] = [
        BUSINESS_PARTNERS,
        ICS,
        ORG_TECH,
        THREAT_ACTOR,
        EXPLOIT,
        THREAT_INTEL,
        TRUSTED_SOURCES,
    ];
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("category with an empty name")]
    EmptyName,
    #[error("category '{0}' is configured more than once")]
    DuplicateCategory(String),
    #[error("category '{0}' is required by the scoring rules but not configured")]
    MissingCategory(&'static str),
}

/// Where a category's keywords are looked for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Title and summary
    #[default]
    Text,
    /// The feed's source name
    Source,
}

/// One configured category: weight, match mode, and keyword file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDef {
    pub name: String,
    pub weight: i64,
    #[serde(default)]
    pub mode: MatchMode,
    pub path: PathBuf,
}

impl CategoryDef {
    pub fn new(
        name: impl Into<String>,
        weight: i64,
        mode: MatchMode,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            weight,
            mode,
            path: path.into(),
        }
    }
}

/// The category table, in scoring order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub categories: Vec<CategoryDef>,
}

impl Default for CategoryConfig {
    fn default() -> Self {
        use names::*;
        use MatchMode::{Source, Text};

        let categories = vec![
            CategoryDef::new(ORG_TECH, 10, Text, "Private/org_tech_keywords.txt"),
            CategoryDef::new(ICS, 9, Text, "Public/ics_oilandgas_keywords.txt"),
            CategoryDef::new(BUSINESS_PARTNERS, 10, Text, "Private/business_partner_keywords.txt"),
            CategoryDef::new(THREAT_INTEL, 6, Text, "Public/threat_intel_keywords.txt"),
            CategoryDef::new(EXPLOIT, 6, Text, "Public/exploit_keywords.txt"),
            CategoryDef::new(TRUSTED_SOURCES, 3, Source, "Public/trusted_sources.txt"),
            CategoryDef::new(LOW_PRIORITY, -5, Text, "Public/low_priority_keywords.txt"),
            CategoryDef::new(GEO, 4, Text, "Private/geo_keywords.txt"),
            CategoryDef::new(THREAT_ACTOR, 7, Text, "Public/threat_actor_keywords.txt"),
            CategoryDef::new(SEVERITY, 8, Text, "Public/severity_keywords.txt"),
            CategoryDef::new(TTP, 7, Text, "Public/ttp_keywords.txt"),
            CategoryDef::new(CROWN_JEWEL, 9, Text, "Private/crown_jewel_keywords.txt"),
        ];

        Self { categories }
    }
}

impl CategoryConfig {
    /// Parse and validate a JSON category table
    pub fn from_json(json: &str) -> Result<Self> {
        let config: CategoryConfig =
            serde_json::from_str(json).context("Failed to parse category configuration")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            anyhow::bail!("Category configuration not found: {}", path.display());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read category configuration: {}", path.display()))?;

        Self::from_json(&content)
            .with_context(|| format!("Invalid category configuration in {}", path.display()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_names(self.categories.iter().map(|c| c.name.as_str()))
    }
}

/// Check names are non-empty, unique, and cover every rule category
pub(crate) fn validate_names<'a>(
    category_names: impl Iterator<Item = &'a str>,
) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in category_names {
        if name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        if !seen.insert(name) {
            return Err(ConfigError::DuplicateCategory(name.to_string()));
        }
    }

    match names::REQUIRED.iter().find(|r| !seen.contains(**r)) {
        Some(missing) => Err(ConfigError::MissingCategory(*missing)),
        None => Ok(()),
    }
}

/// Runtime settings: where keyword lists live and which category table to use
#[derive(Debug, Clone)]
pub struct Config {
    pub keyword_dir: PathBuf,
    pub categories_file: Option<PathBuf>,
}

impl Config {
    pub fn new(keyword_dir: impl Into<PathBuf>) -> Self {
        Self {
            keyword_dir: keyword_dir.into(),
            categories_file: None,
        }
    }

    pub fn from_env() -> Result<Self> {
        // Try to load .env from multiple locations
        Self::try_load_dotenv();

        let keyword_dir = optional_var(KEYWORD_DIR_VAR)?
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_KEYWORD_DIR));

        let categories_file = optional_var(CATEGORIES_VAR)?.map(PathBuf::from);

        Ok(Self {
            keyword_dir,
            categories_file,
        })
    }

    /// The configured category table, or the built-in one
    pub fn category_config(&self) -> Result<CategoryConfig> {
        match &self.categories_file {
            Some(path) => CategoryConfig::load(path),
            None => Ok(CategoryConfig::default()),
        }
    }

    fn try_load_dotenv() {
        // 1. Current directory (for development)
        if dotenvy::dotenv().is_ok() {
            return;
        }

        // 2. ~/.config/rcna/.env
        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("rcna").join(".env");
            if config_path.exists() && dotenvy::from_path(&config_path).is_ok() {
                return;
            }
        }

        // 3. ~/.env
        if let Some(home_dir) = dirs::home_dir() {
            let home_path = home_dir.join(".env");
            if home_path.exists() {
                let _ = dotenvy::from_path(&home_path);
            }
        }
    }
}

fn optional_var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e).with_context(|| format!("{} is not valid UTF-8", name)),
    }
}
