use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use super::domain::{
    AssessmentId, AssessmentSubmission, Questionnaire, QuestionnaireForm, SubjectName,
    ValidationError,
};
use super::repository::{AssessmentRecord, AssessmentRepository, RepositoryError};
use super::scoring::{RiskResult, RiskScoringEngine};

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Service composing the scoring engine with a caller-supplied history store.
pub struct RiskAssessmentService<R> {
    repository: Arc<R>,
    engine: RiskScoringEngine,
    page_size: usize,
}

static ASSESSMENT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_assessment_id() -> AssessmentId {
    let id = ASSESSMENT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    AssessmentId(format!("asm-{id:06}"))
}

impl<R> RiskAssessmentService<R>
where
    R: AssessmentRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self {
            repository,
            engine: RiskScoringEngine::new(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn repository(&self) -> &Arc<R> {
        &self.repository
    }

    /// Score a form without recording it.
    pub fn evaluate(&self, form: QuestionnaireForm) -> Result<RiskResult, AssessmentServiceError> {
        let questionnaire = parse_form(form)?;
        Ok(self.engine.score(&questionnaire)?)
    }

    /// Validate, score, and record an assessment stamped with the current time.
    pub fn assess(
        &self,
        submission: AssessmentSubmission,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        self.assess_at(submission, Utc::now())
    }

    pub fn assess_at(
        &self,
        submission: AssessmentSubmission,
        assessed_at: DateTime<Utc>,
    ) -> Result<AssessmentRecord, AssessmentServiceError> {
        let subject = SubjectName::parse(&submission.subject).inspect_err(|err| {
            warn!(error = %err, "assessment rejected");
        })?;
        let questionnaire = parse_form(submission.questionnaire)?;
        let result = self.engine.score(&questionnaire)?;

        let record = AssessmentRecord {
            id: next_assessment_id(),
            subject,
            assessed_at,
            questionnaire,
            result,
        };

        let stored = self.repository.insert(record)?;
        info!(
            assessment_id = %stored.id,
            tier = stored.result.tier.label(),
            score = stored.result.score,
            "assessment recorded"
        );
        Ok(stored)
    }

    pub fn get(&self, id: &AssessmentId) -> Result<AssessmentRecord, AssessmentServiceError> {
        let record = self
            .repository
            .fetch(id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }

    /// Newest first; `None` uses the configured page size.
    pub fn history(
        &self,
        limit: Option<usize>,
    ) -> Result<Vec<AssessmentRecord>, AssessmentServiceError> {
        let limit = limit.unwrap_or(self.page_size);
        Ok(self.repository.recent(limit)?)
    }
}

fn parse_form(form: QuestionnaireForm) -> Result<Questionnaire, ValidationError> {
    Questionnaire::try_from(form).inspect_err(|err| {
        warn!(error = %err, "questionnaire rejected");
    })
}

/// Error raised by the assessment service.
#[derive(Debug, thiserror::Error)]
pub enum AssessmentServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
