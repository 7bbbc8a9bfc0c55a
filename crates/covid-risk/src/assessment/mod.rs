//! Questionnaire intake, risk scoring, and assessment history.
//!
//! The scoring engine is a pure function of a [`Questionnaire`]; history lives in an
//! [`AssessmentRepository`] supplied by the caller and is only touched by the service.

pub mod domain;
pub mod repository;
pub mod router;
pub mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AssessmentId, AssessmentSubmission, FactorCategory, MeasurementField, Questionnaire,
    QuestionnaireForm, RiskFactor, RiskFactors, Sex, SubjectName, ValidationError,
};
pub use repository::{
    AssessmentRecord, AssessmentRepository, AssessmentSummaryView, AssessmentView,
    InMemoryAssessmentRepository, RepositoryError,
};
pub use router::assessment_router;
pub use scoring::{
    factor_weight, score, Recommendation, RiskResult, RiskResultView, RiskScoringEngine,
    RiskTier, ScoreComponent, ScoreSource,
};
pub use service::{AssessmentServiceError, RiskAssessmentService, DEFAULT_PAGE_SIZE};
