use std::sync::Arc;

use covid_risk::assessment::{
    AssessmentRepository, AssessmentSubmission, InMemoryAssessmentRepository, QuestionnaireForm,
    RiskAssessmentService, RiskTier, Sex,
};

fn submission(subject: &str, age: &str) -> AssessmentSubmission {
    AssessmentSubmission {
        subject: subject.to_string(),
        questionnaire: QuestionnaireForm {
            age: Some(age.to_string()),
            weight_kg: Some("68".to_string()),
            height_cm: Some("172".to_string()),
            sex: Sex::Female,
            ..QuestionnaireForm::default()
        },
    }
}

#[test]
fn history_is_owned_by_the_injected_repository() {
    let repository = Arc::new(InMemoryAssessmentRepository::new());
    let service = RiskAssessmentService::new(repository.clone());

    service
        .assess(submission("Petrova Anna", "31"))
        .expect("first assessment stored");
    service
        .assess(submission("Sidorov Pavel Olegovich", "66"))
        .expect("second assessment stored");

    let recent = repository.recent(10).expect("repository lists records");
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].subject.as_str(), "Sidorov Pavel Olegovich");
    assert_eq!(recent[0].result.tier, RiskTier::Moderate);
    assert_eq!(recent[1].summary().sex, "Female");

    let other_service = RiskAssessmentService::new(Arc::new(InMemoryAssessmentRepository::new()));
    assert!(other_service
        .history(None)
        .expect("history loads")
        .is_empty());
}

#[test]
fn rejected_submissions_leave_history_untouched() {
    let repository = Arc::new(InMemoryAssessmentRepository::new());
    let service = RiskAssessmentService::new(repository.clone());

    assert!(service.assess(submission("Anna", "31")).is_err());
    assert!(service.assess(submission("Petrova Anna", "")).is_err());
    assert!(repository.is_empty());
}
