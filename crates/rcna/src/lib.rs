// Public modules
pub mod config;
pub mod evidence;
pub mod io;
pub mod keywords;
pub mod matcher;
pub mod models;
pub mod ranker;
pub mod risk;
pub mod scorer;

// Re-export commonly used types
pub use config::{CategoryConfig, CategoryDef, Config, ConfigError, MatchMode};
pub use evidence::{Evidence, EvidenceEntry, MatchEvidence};
pub use io::{get_default_output_dir, load_articles, load_ranked, save_ranked};
pub use keywords::{Category, KeywordStore};
pub use matcher::ArticleText;
pub use models::{Article, RankedBatch, ScoredArticle};
pub use ranker::Ranker;
pub use risk::RiskAssessment;
pub use scorer::{ScoreCard, ScoringError};
