use thiserror::Error;

use crate::config::names;
use crate::evidence::{Evidence, MatchEvidence};
use crate::keywords::KeywordStore;
use crate::matcher::ArticleText;
use crate::models::Article;

pub const RANSOMWARE_SOURCE_TYPE: &str = "ransomware";
pub const OVERRIDE_SCORE: i64 = 100;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("score overflowed adding category '{category}' (weight {weight})")]
    ScoreOverflow { category: String, weight: i64 },
    #[error("final rank overflowed (score {score}, risk {risk_score})")]
    RankOverflow { score: i64, risk_score: i64 },
}

/// Keyword score for one article, before the risk matrix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreCard {
    pub score: i64,
    pub critical: bool,
    pub evidence: MatchEvidence,
}

/// Sum the weights of every matching category, then apply the ransomware override
pub fn accumulate(article: &Article, store: &KeywordStore) -> Result<ScoreCard, ScoringError> {
    let text = ArticleText::new(article);
    let mut card = ScoreCard::default();

    for category in store.categories() {
        let Some(evidence) = text.match_category(category) else {
            continue;
        };

        card.score = card
            .score
            .checked_add(category.weight)
            .ok_or_else(|| ScoringError::ScoreOverflow {
                category: category.name.clone(),
                weight: category.weight,
            })?;
        card.evidence.record(category.name.as_str(), evidence);
    }

    apply_ransomware_override(article, &mut card);
    Ok(card)
}

/// A partner named in a ransomware feed always goes to the top, whatever the
/// keyword score was.
fn apply_ransomware_override(article: &Article, card: &mut ScoreCard) {
    if article.is_source_type(RANSOMWARE_SOURCE_TYPE)
        && card.evidence.contains(names::BUSINESS_PARTNERS)
    {
        card.score = OVERRIDE_SCORE;
        card.critical = true;
        card.evidence.record(names::RANSOM_OVERRIDE, Evidence::Override);
    }
}
