use serde::{Deserialize, Serialize};

use crate::config::names;
use crate::evidence::MatchEvidence;
use crate::scorer::ScoringError;

/// How much one point of risk is worth against one point of keyword score
pub const RISK_LEVERAGE: i64 = 2;

/// Position of an article on the impact × likelihood matrix. Both axes run 1–4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub impact: u8,
    pub likelihood: u8,
}

impl Default for RiskAssessment {
    fn default() -> Self {
        Self {
            impact: 1,
            likelihood: 1,
        }
    }
}

impl RiskAssessment {
    /// Derive impact and likelihood from matched categories. Rules run in a
    /// fixed order; the trusted-source rule assigns likelihood outright rather
    /// than raising it.
    pub fn evaluate(evidence: &MatchEvidence) -> Self {
        let matched = |name: &str| evidence.contains(name);

        let mut impact: u8 = 1;
        if matched(names::BUSINESS_PARTNERS) {
            impact = 2;
        }
        if matched(names::ICS) {
            impact = impact.max(2);
        }
        if matched(names::ORG_TECH) {
            impact = 3;
        }
        if matched(names::ICS) && matched(names::THREAT_ACTOR) {
            impact = impact.max(4);
        }

        let mut likelihood: u8 = 1;
        if matched(names::EXPLOIT) {
            likelihood = 2;
        }
        if matched(names::THREAT_INTEL) {
            likelihood = likelihood.max(2);
        }
        if matched(names::TRUSTED_SOURCES) {
            likelihood = 3;
        }

        Self { impact, likelihood }
    }

    pub fn risk_score(&self) -> i64 {
        i64::from(self.impact) * i64::from(self.likelihood)
    }

    /// `score + 2 × risk_score`
    pub fn final_rank(&self, score: i64) -> Result<i64, ScoringError> {
        let risk_score = self.risk_score();
        score
            .checked_add(risk_score * RISK_LEVERAGE)
            .ok_or(ScoringError::RankOverflow { score, risk_score })
    }
}
