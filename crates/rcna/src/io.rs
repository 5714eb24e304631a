use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Article, RankedBatch, RANKED_BATCH_VERSION};

/// Get the default directory for ranked output files
pub fn get_default_output_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_local_dir()
        .context("Could not determine local data directory")?
        .join("rcna")
        .join("ranked");

    fs::create_dir_all(&data_dir).context("Failed to create ranked output directory")?;

    Ok(data_dir)
}

/// Parse a JSON array of articles
pub fn parse_articles(json: &str) -> Result<Vec<Article>> {
    serde_json::from_str(json)
        .context("Failed to parse articles JSON (expected an array of articles)")
}

/// Load articles produced by feed retrieval
pub fn load_articles(filepath: &Path) -> Result<Vec<Article>> {
    if !filepath.exists() {
        anyhow::bail!("Article file not found: {}", filepath.display());
    }

    let content = fs::read_to_string(filepath)
        .with_context(|| format!("Failed to read article file: {}", filepath.display()))?;

    parse_articles(&content)
        .with_context(|| format!("Invalid article file: {}", filepath.display()))
}

/// Save a ranked batch as pretty-printed JSON
pub fn save_ranked(batch: &RankedBatch, filepath: &Path) -> Result<()> {
    let json =
        serde_json::to_string_pretty(batch).context("Failed to serialize ranked articles")?;

    if let Some(parent) = filepath.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(filepath, json)
        .with_context(|| format!("Failed to write ranked file: {}", filepath.display()))?;

    Ok(())
}

/// Load a ranked batch written by `save_ranked`
pub fn load_ranked(filepath: &Path) -> Result<RankedBatch> {
    if !filepath.exists() {
        anyhow::bail!("Ranked file not found: {}", filepath.display());
    }

    let content = fs::read_to_string(filepath)
        .with_context(|| format!("Failed to read ranked file: {}", filepath.display()))?;

    let batch: RankedBatch = serde_json::from_str(&content).with_context(|| {
        format!(
            "Failed to parse ranked JSON from {}. The file may be corrupted or not a ranked batch.",
            filepath.display()
        )
    })?;

    if batch.version != RANKED_BATCH_VERSION {
        anyhow::bail!(
            "Unsupported ranked file version: {}. Expected {}.",
            batch.version,
            RANKED_BATCH_VERSION
        );
    }

    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CategoryConfig;
    use crate::keywords::KeywordStore;
    use crate::ranker::Ranker;

    #[test]
    fn test_parse_articles() {
        let json = r#"[
            {"title": "A", "summary": "s", "link": "https://a", "source": "Feed",
             "published": "Mon, 02 Jun 2025 10:00:00 GMT", "source_type": "news"},
            {"title": "B"}
        ]"#;
        let articles = parse_articles(json).unwrap();
        assert_eq!(articles.len(), 2);
        assert_eq!(articles[0].source_type.as_deref(), Some("news"));
        assert_eq!(articles[1].link, "");
    }

    #[test]
    fn test_parse_articles_rejects_object() {
        assert!(parse_articles(r#"{"title": "A"}"#).is_err());
    }

    #[test]
    fn test_load_articles_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_articles(&dir.path().join("articles.json")).unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_save_then_load_ranked() {
        let dir = tempfile::tempdir().unwrap();
        let store = KeywordStore::load(&CategoryConfig::default(), dir.path()).unwrap();
        let ranked = Ranker::new(store).rank(vec![Article::new("Title", "Summary", "Feed")]);
        let path = dir.path().join("out").join("ranked.json");

        save_ranked(&RankedBatch::new(ranked.clone()), &path).unwrap();
        let loaded = load_ranked(&path).unwrap();

        assert_eq!(loaded.articles, ranked);
    }

    #[test]
    fn test_load_ranked_rejects_unknown_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranked.json");
        fs::write(&path, r#"{"version": "9.9", "created_at": "", "articles": []}"#).unwrap();

        let err = load_ranked(&path).unwrap_err();
        assert!(err.to_string().contains("Unsupported ranked file version"));
    }

    #[test]
    fn test_load_ranked_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ranked.json");
        fs::write(&path, "not json").unwrap();
        assert!(load_ranked(&path).is_err());
    }
}
