use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::assessment::domain::{
    AssessmentId, AssessmentSubmission, Questionnaire, QuestionnaireForm, RiskFactor, RiskFactors,
    Sex,
};
use crate::assessment::repository::{
    AssessmentRecord, AssessmentRepository, InMemoryAssessmentRepository, RepositoryError,
};
use crate::assessment::{assessment_router, RiskAssessmentService};

pub(super) fn questionnaire(age: i32, weight_kg: f64, height_cm: f64) -> Questionnaire {
    Questionnaire::new(age, weight_kg, height_cm, Sex::Male, RiskFactors::default())
        .expect("valid questionnaire")
}

/// 25 years old, BMI about 22, so neither bracket contributes.
pub(super) fn baseline() -> Questionnaire {
    questionnaire(25, 60.0, 165.0)
}

pub(super) fn with_factors(
    mut questionnaire: Questionnaire,
    factors: &[RiskFactor],
) -> Questionnaire {
    for factor in factors {
        questionnaire.factors.set(*factor, true);
    }
    questionnaire
}

pub(super) fn form(age: &str, weight_kg: &str, height_cm: &str) -> QuestionnaireForm {
    QuestionnaireForm {
        age: Some(age.to_string()),
        weight_kg: Some(weight_kg.to_string()),
        height_cm: Some(height_cm.to_string()),
        sex: Sex::Male,
        factors: RiskFactors::default(),
    }
}

pub(super) fn submission() -> AssessmentSubmission {
    let mut questionnaire = form("70", "90", "170");
    questionnaire.factors.diabetes = true;
    AssessmentSubmission {
        subject: "Ivanov Ivan Ivanovich".to_string(),
        questionnaire,
    }
}

pub(super) fn build_service() -> (
    RiskAssessmentService<InMemoryAssessmentRepository>,
    Arc<InMemoryAssessmentRepository>,
) {
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let service = RiskAssessmentService::new(repository.clone());
    (service, repository)
}

pub(super) struct ConflictRepository;

impl AssessmentRepository for ConflictRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Ok(None)
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Ok(Vec::new())
    }
}

pub(super) struct UnavailableRepository;

impl AssessmentRepository for UnavailableRepository {
    fn insert(&self, _record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn recent(&self, _limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn assert_conflict_response(response: Response) {
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assessment_router_with_service(
    service: RiskAssessmentService<InMemoryAssessmentRepository>,
) -> axum::Router {
    assessment_router(Arc::new(service))
}
