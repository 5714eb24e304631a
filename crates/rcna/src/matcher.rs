use crate::config::MatchMode;
use crate::evidence::Evidence;
use crate::keywords::Category;
use crate::models::Article;

/// Lowercased views of an article, computed once and matched against every category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleText {
    text: String,
    source: String,
}

impl ArticleText {
    pub fn new(article: &Article) -> Self {
        let text = format!("{} {}", article.title, article.summary).to_lowercase();
        Self {
            text,
            source: article.source.to_lowercase(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Evidence for `category`, or `None` when nothing matched
    pub fn match_category(&self, category: &Category) -> Option<Evidence> {
        match category.mode {
            MatchMode::Text => {
                let keywords = self.matched_keywords(&category.keywords);
                if keywords.is_empty() {
                    None
                } else {
                    Some(Evidence::Text { keywords })
                }
            }
            MatchMode::Source => {
                if self.source_matches(&category.keywords) {
                    Some(Evidence::Source)
                } else {
                    None
                }
            }
        }
    }

    /// Every keyword contained in the title/summary text, in list order
    pub fn matched_keywords(&self, keywords: &[String]) -> Vec<String> {
        keywords
            .iter()
            .filter(|kw| !kw.is_empty() && self.text.contains(kw.as_str()))
            .cloned()
            .collect()
    }

    pub fn source_matches(&self, keywords: &[String]) -> bool {
        keywords
            .iter()
            .any(|kw| !kw.is_empty() && self.source.contains(kw.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, summary: &str, source: &str) -> Article {
        Article::new(title, summary, source)
    }

    #[test]
    fn test_text_is_lowercased_and_joined() {
        let text = ArticleText::new(&article("APT29 Targets", "SCADA Systems", "CISA Alerts"));
        assert_eq!(text.text(), "apt29 targets scada systems");
        assert_eq!(text.source(), "cisa alerts");
    }

    #[test]
    fn test_text_match_collects_in_keyword_order() {
        let text = ArticleText::new(&article("Critical exploit", "PoC for zero-day", "Blog"));
        let category = Category::text("exploit_keywords", 6, &["zero-day", "rce", "poc", "exploit"]);

        assert_eq!(
            text.match_category(&category),
            Some(Evidence::Text {
                keywords: vec!["zero-day".into(), "poc".into(), "exploit".into()]
            })
        );
    }

    #[test]
    fn test_text_match_is_substring() {
        let text = ArticleText::new(&article("Ransomware gangs", "", "Blog"));
        let category = Category::text("threat_intel", 6, &["ransom"]);
        assert!(text.match_category(&category).is_some());
    }

    #[test]
    fn test_match_spans_title_and_summary_boundary() {
        // Keywords may straddle the joining space
        let text = ArticleText::new(&article("Azure", "AD outage", "Blog"));
        let category = Category::text("org_tech", 10, &["azure ad"]);
        assert!(text.match_category(&category).is_some());
    }

    #[test]
    fn test_text_match_ignores_source() {
        let text = ArticleText::new(&article("Nothing here", "", "SCADA Weekly"));
        let category = Category::text("ics_keywords", 9, &["scada"]);
        assert_eq!(text.match_category(&category), None);
    }

    #[test]
    fn test_source_match_uses_sentinel() {
        let text = ArticleText::new(&article("Advisory", "", "CISA Alerts"));
        let category = Category::source("trusted_sources", 3, &["krebs", "cisa"]);
        assert_eq!(text.match_category(&category), Some(Evidence::Source));
    }

    #[test]
    fn test_source_match_ignores_text() {
        let text = ArticleText::new(&article("CISA issues advisory", "cisa", "RandomBlog"));
        let category = Category::source("trusted_sources", 3, &["cisa"]);
        assert_eq!(text.match_category(&category), None);
    }

    #[test]
    fn test_empty_keyword_set_never_matches() {
        let text = ArticleText::new(&article("anything", "at all", "anywhere"));
        assert_eq!(text.match_category(&Category::text("geo_keywords", 4, &[])), None);
        assert_eq!(text.match_category(&Category::source("trusted_sources", 3, &[])), None);
    }

    #[test]
    fn test_empty_keyword_string_never_matches() {
        let text = ArticleText::new(&article("anything", "", "anywhere"));
        let category = Category::new("geo_keywords", 4, MatchMode::Text, vec![String::new()]);
        assert_eq!(text.match_category(&category), None);
    }
}
