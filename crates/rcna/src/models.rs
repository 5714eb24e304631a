use serde::{Deserialize, Deserializer, Serialize};

use crate::evidence::MatchEvidence;
use crate::risk::RiskAssessment;
use crate::scorer::ScoreCard;

pub const RANKED_BATCH_VERSION: &str = "1.0";

/// A feed article as handed over by feed retrieval. Missing or null fields
/// read as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Article {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub summary: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub link: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub source: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub published: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_type: Option<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Article {
    pub fn new(
        title: impl Into<String>,
        summary: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_source_type(mut self, source_type: impl Into<String>) -> Self {
        self.source_type = Some(source_type.into());
        self
    }

    pub fn is_source_type(&self, source_type: &str) -> bool {
        self.source_type.as_deref() == Some(source_type)
    }
}

/// An article with its score, risk and rank. Built once by the ranker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredArticle {
    #[serde(flatten)]
    article: Article,
    score: i64,
    impact: u8,
    likelihood: u8,
    risk_score: i64,
    final_rank: i64,
    #[serde(default)]
    critical: bool,
    evidence: MatchEvidence,
}

impl ScoredArticle {
    pub(crate) fn new(
        article: Article,
        card: ScoreCard,
        risk: RiskAssessment,
        final_rank: i64,
    ) -> Self {
        Self {
            article,
            score: card.score,
            impact: risk.impact,
            likelihood: risk.likelihood,
            risk_score: risk.risk_score(),
            final_rank,
            critical: card.critical,
            evidence: card.evidence,
        }
    }

    /// Placeholder for an article whose scoring failed: no evidence, lowest risk
    pub(crate) fn neutral(article: Article) -> Self {
        let risk = RiskAssessment::default();
        let final_rank = risk.risk_score() * crate::risk::RISK_LEVERAGE;
        Self::new(article, ScoreCard::default(), risk, final_rank)
    }

    pub fn article(&self) -> &Article {
        &self.article
    }

    pub fn into_article(self) -> Article {
        self.article
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn impact(&self) -> u8 {
        self.impact
    }

    pub fn likelihood(&self) -> u8 {
        self.likelihood
    }

    pub fn risk_score(&self) -> i64 {
        self.risk_score
    }

    pub fn final_rank(&self) -> i64 {
        self.final_rank
    }

    pub fn critical(&self) -> bool {
        self.critical
    }

    pub fn evidence(&self) -> &MatchEvidence {
        &self.evidence
    }
}

/// Ranked articles for serialization
#[derive(Debug, Serialize, Deserialize)]
pub struct RankedBatch {
    pub version: String,
    pub created_at: String,
    pub articles: Vec<ScoredArticle>,
}

impl RankedBatch {
    pub fn new(articles: Vec<ScoredArticle>) -> Self {
        Self {
            version: RANKED_BATCH_VERSION.to_string(),
            created_at: chrono::Utc::now().to_rfc3339(),
            articles,
        }
    }
}
