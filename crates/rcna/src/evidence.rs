use serde::{Deserialize, Serialize};

/// Marker shown for categories matched through the article's source
pub const SOURCE_MATCH: &str = "SOURCE MATCH";

/// Why a single category counted towards an article's score
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Evidence {
    /// Keywords found in the title or summary, in keyword-list order
    Text { keywords: Vec<String> },
    /// A keyword matched the feed's source name
    Source,
    /// The ransomware override fired
    Override,
}

impl Evidence {
    pub fn describe(&self) -> String {
        match self {
            Evidence::Text { keywords } => keywords.join(", "),
            Evidence::Source => SOURCE_MATCH.to_string(),
            Evidence::Override => "override".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceEntry {
    pub category: String,
    pub evidence: Evidence,
}

/// Ordered record of every category that matched an article
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MatchEvidence {
    entries: Vec<EvidenceEntry>,
}

impl MatchEvidence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record evidence for a category. A category recorded twice keeps the
    /// latest evidence in its original position.
    pub fn record(&mut self, category: impl Into<String>, evidence: Evidence) {
        let category = category.into();
        if let Some(entry) = self.entries.iter_mut().find(|e| e.category == category) {
            entry.evidence = evidence;
        } else {
            self.entries.push(EvidenceEntry { category, evidence });
        }
    }

    pub fn contains(&self, category: &str) -> bool {
        self.get(category).is_some()
    }

    pub fn get(&self, category: &str) -> Option<&Evidence> {
        self.entries
            .iter()
            .find(|e| e.category == category)
            .map(|e| &e.evidence)
    }

    pub fn iter(&self) -> impl Iterator<Item = &EvidenceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn overridden(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e.evidence, Evidence::Override))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_insertion_order() {
        let mut evidence = MatchEvidence::new();
        evidence.record("ics_keywords", Evidence::Text { keywords: vec!["scada".into()] });
        evidence.record("trusted_sources", Evidence::Source);

        let names: Vec<_> = evidence.iter().map(|e| e.category.as_str()).collect();
        assert_eq!(names, vec!["ics_keywords", "trusted_sources"]);
        assert!(evidence.contains("trusted_sources"));
        assert!(!evidence.contains("org_tech"));
        assert!(!evidence.overridden());
    }

    #[test]
    fn test_record_same_category_replaces() {
        let mut evidence = MatchEvidence::new();
        evidence.record("geo_keywords", Evidence::Text { keywords: vec!["australia".into()] });
        evidence.record("geo_keywords", Evidence::Source);

        assert_eq!(evidence.len(), 1);
        assert_eq!(evidence.get("geo_keywords"), Some(&Evidence::Source));
    }

    #[test]
    fn test_describe() {
        let text = Evidence::Text {
            keywords: vec!["apt29".into(), "fin7".into()],
        };
        assert_eq!(text.describe(), "apt29, fin7");
        assert_eq!(Evidence::Source.describe(), "SOURCE MATCH");
        assert_eq!(Evidence::Override.describe(), "override");
    }

    #[test]
    fn test_serializes_as_tagged_list() {
        let mut evidence = MatchEvidence::new();
        evidence.record("trusted_sources", Evidence::Source);
        evidence.record("ransom_override", Evidence::Override);

        let json = serde_json::to_value(&evidence).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                { "category": "trusted_sources", "evidence": { "kind": "source" } },
                { "category": "ransom_override", "evidence": { "kind": "override" } }
            ])
        );
    }
}
