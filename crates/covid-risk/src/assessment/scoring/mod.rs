mod recommendations;
mod rules;
mod tier;

pub use recommendations::Recommendation;
pub use rules::factor_weight;
pub use tier::RiskTier;

use super::domain::{Questionnaire, RiskFactor, ValidationError};
use recommendations::recommend;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stateless engine mapping a questionnaire to a score, tier, and advice.
#[derive(Debug, Clone, Copy, Default)]
pub struct RiskScoringEngine;

impl RiskScoringEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, questionnaire: &Questionnaire) -> Result<RiskResult, ValidationError> {
        questionnaire.validate()?;

        let (components, score) = rules::score_questionnaire(questionnaire);
        let tier = RiskTier::from_score(score);
        let recommendations = recommend(score, questionnaire);

        debug!(
            score,
            tier = tier.label(),
            components = components.len(),
            "questionnaire scored"
        );

        Ok(RiskResult {
            score,
            tier,
            bmi: questionnaire.bmi(),
            recommendations,
            components,
        })
    }
}

/// Scores a questionnaire with the fixed rubric.
pub fn score(questionnaire: &Questionnaire) -> Result<RiskResult, ValidationError> {
    RiskScoringEngine.score(questionnaire)
}

/// What a score component was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "factor", rename_all = "snake_case")]
pub enum ScoreSource {
    AgeBracket,
    BmiBracket,
    Factor(RiskFactor),
}

/// Discrete contribution to a score, kept for audits and display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub source: ScoreSource,
    pub points: i32,
    pub note: String,
}

/// Outcome of scoring one questionnaire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub score: i32,
    pub tier: RiskTier,
    pub bmi: f64,
    pub recommendations: Vec<Recommendation>,
    pub components: Vec<ScoreComponent>,
}

impl RiskResult {
    pub fn headline(&self) -> String {
        format!("{} risk (score: {})", self.tier.label(), self.score)
    }

    pub fn recommendation_messages(&self) -> Vec<&'static str> {
        self.recommendations
            .iter()
            .map(|recommendation| recommendation.message())
            .collect()
    }

    pub fn view(&self) -> RiskResultView {
        RiskResultView {
            score: self.score,
            tier: self.tier,
            tier_label: self.tier.label(),
            color: self.tier.color(),
            headline: self.headline(),
            bmi: (self.bmi * 10.0).round() / 10.0,
            recommendations: self
                .recommendations
                .iter()
                .map(|recommendation| RecommendationView {
                    code: *recommendation,
                    message: recommendation.message(),
                })
                .collect(),
            components: self.components.clone(),
        }
    }
}

/// Presentation form of a result with resolved labels and messages.
#[derive(Debug, Clone, Serialize)]
pub struct RiskResultView {
    pub score: i32,
    pub tier: RiskTier,
    pub tier_label: &'static str,
    pub color: &'static str,
    pub headline: String,
    pub bmi: f64,
    pub recommendations: Vec<RecommendationView>,
    pub components: Vec<ScoreComponent>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationView {
    pub code: Recommendation,
    pub message: &'static str,
}
