use super::common::*;
use crate::assessment::domain::{AssessmentId, MeasurementField, ValidationError};
use crate::assessment::repository::{AssessmentRepository, RepositoryError};
use crate::assessment::scoring::RiskTier;
use crate::assessment::{
    AssessmentServiceError, InMemoryAssessmentRepository, RiskAssessmentService,
};
use chrono::{TimeZone, Utc};
use std::sync::Arc;

#[test]
fn assess_scores_and_records_submission() {
    let (service, repository) = build_service();
    let assessed_at = Utc
        .with_ymd_and_hms(2024, 3, 9, 14, 5, 0)
        .single()
        .expect("valid timestamp");

    let record = service
        .assess_at(submission(), assessed_at)
        .expect("submission is stored");

    assert_eq!(record.result.score, 8);
    assert_eq!(record.result.tier, RiskTier::Elevated);
    assert_eq!(record.subject.as_str(), "Ivanov Ivan Ivanovich");
    let stored = repository
        .fetch(&record.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored, record);

    let summary = record.summary();
    assert_eq!(summary.assessed_at, "09.03.2024 14:05");
    assert_eq!(summary.measurements, "90kg/170cm");
    assert_eq!(summary.factors, vec!["Diabetes mellitus"]);
    assert_eq!(summary.result, "Elevated risk (score: 8)");
    assert_eq!(summary.color, "orange");
    assert_eq!(summary.sex, "Male");
}

#[test]
fn summary_reports_absence_of_factors() {
    let (service, _) = build_service();
    let mut submission = submission();
    submission.questionnaire.factors = Default::default();

    let record = service.assess(submission).expect("stored");

    assert_eq!(record.summary().factors, vec!["No risk factors"]);
}

#[test]
fn assess_rejects_single_word_names_without_storing() {
    let (service, repository) = build_service();
    let mut submission = submission();
    submission.subject = "Ivanov".to_string();

    match service.assess(submission) {
        Err(AssessmentServiceError::Validation(ValidationError::IncompleteName(name))) => {
            assert_eq!(name, "Ivanov");
        }
        other => panic!("expected incomplete name, got {other:?}"),
    }
    assert!(repository.is_empty());
}

#[test]
fn assess_rejects_malformed_measurements_without_storing() {
    let (service, repository) = build_service();
    let mut submission = submission();
    submission.questionnaire.age = Some("abc".to_string());

    match service.assess(submission) {
        Err(AssessmentServiceError::Validation(ValidationError::NotNumeric { field, .. })) => {
            assert_eq!(field, MeasurementField::Age);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert!(repository.is_empty());
}

#[test]
fn evaluate_does_not_touch_history() {
    let (service, repository) = build_service();

    let result = service
        .evaluate(form("25", "60", "165"))
        .expect("valid form scores");

    assert_eq!(result.tier, RiskTier::Low);
    assert!(repository.is_empty());
}

#[test]
fn evaluate_rejects_zero_weight() {
    let (service, _) = build_service();

    match service.evaluate(form("25", "0", "165")) {
        Err(AssessmentServiceError::Validation(ValidationError::NonPositive { field, .. })) => {
            assert_eq!(field, MeasurementField::WeightKg);
        }
        other => panic!("expected non-positive weight, got {other:?}"),
    }
}

#[test]
fn history_lists_newest_first_and_honours_page_size() {
    let repository = Arc::new(InMemoryAssessmentRepository::default());
    let service = RiskAssessmentService::new(repository.clone()).with_page_size(2);

    let first = service.assess(submission()).expect("stored");
    let second = service.assess(submission()).expect("stored");
    let third = service.assess(submission()).expect("stored");

    let page = service.history(None).expect("history loads");
    let ids: Vec<&AssessmentId> = page.iter().map(|record| &record.id).collect();
    assert_eq!(ids, vec![&third.id, &second.id]);

    let all = service.history(Some(10)).expect("history loads");
    assert_eq!(all.len(), 3);
    assert_eq!(all[2].id, first.id);
}

#[test]
fn bounded_history_evicts_oldest_records() {
    let repository = Arc::new(InMemoryAssessmentRepository::with_capacity(2));
    let service = RiskAssessmentService::new(repository.clone());

    let first = service.assess(submission()).expect("stored");
    service.assess(submission()).expect("stored");
    service.assess(submission()).expect("stored");

    assert_eq!(repository.len(), 2);
    match service.get(&first.id) {
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected evicted record, got {other:?}"),
    }
}

#[test]
fn get_propagates_not_found() {
    let (service, _) = build_service();

    match service.get(&AssessmentId("asm-missing".to_string())) {
        Err(AssessmentServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn repository_failures_surface_to_callers() {
    let service = RiskAssessmentService::new(Arc::new(UnavailableRepository));

    match service.assess(submission()) {
        Err(AssessmentServiceError::Repository(RepositoryError::Unavailable(reason))) => {
            assert_eq!(reason, "database offline");
        }
        other => panic!("expected unavailable repository, got {other:?}"),
    }
    assert!(service.history(None).is_err());
}

#[test]
fn duplicate_ids_are_rejected_by_the_store() {
    let (service, repository) = build_service();
    let record = service.assess(submission()).expect("stored");

    match repository.insert(record) {
        Err(RepositoryError::Conflict) => {}
        other => panic!("expected conflict, got {other:?}"),
    }
}
