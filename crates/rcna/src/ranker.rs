use crate::keywords::KeywordStore;
use crate::models::{Article, ScoredArticle};
use crate::risk::RiskAssessment;
use crate::scorer::{self, ScoringError};

/// Scores a batch of articles against one keyword store and orders them for the digest
pub struct Ranker {
    store: KeywordStore,
}

impl Ranker {
    pub fn new(store: KeywordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &KeywordStore {
        &self.store
    }

    pub fn try_score(&self, article: Article) -> Result<ScoredArticle, (Article, ScoringError)> {
        let card = match scorer::accumulate(&article, &self.store) {
            Ok(card) => card,
            Err(e) => return Err((article, e)),
        };
        let risk = RiskAssessment::evaluate(&card.evidence);
        match risk.final_rank(card.score) {
            Ok(final_rank) => Ok(ScoredArticle::new(article, card, risk, final_rank)),
            Err(e) => Err((article, e)),
        }
    }

    /// Score one article. A scoring fault is logged and the article gets the
    /// neutral score instead.
    pub fn score(&self, article: Article) -> ScoredArticle {
        self.try_score(article).unwrap_or_else(|(article, e)| {
            tracing::warn!(
                title = %article.title,
                error = %e,
                "scoring failed, using neutral score"
            );
            ScoredArticle::neutral(article)
        })
    }

    /// Score every article and sort by final rank, highest first. Equal ranks
    /// keep their batch order.
    pub fn rank(&self, articles: Vec<Article>) -> Vec<ScoredArticle> {
        let mut scored: Vec<ScoredArticle> =
            articles.into_iter().map(|article| self.score(article)).collect();

        scored.sort_by(|a, b| b.final_rank().cmp(&a.final_rank()));

        tracing::info!(
            articles = scored.len(),
            critical = scored.iter().filter(|a| a.critical()).count(),
            "ranked batch"
        );

        scored
    }
}
