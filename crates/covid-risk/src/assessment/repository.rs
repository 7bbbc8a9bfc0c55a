use std::collections::VecDeque;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::domain::{AssessmentId, Questionnaire, SubjectName};
use super::scoring::{RiskResult, RiskResultView};

const NO_FACTORS_LABEL: &str = "No risk factors";

/// Stored assessment: who, when, what was answered, and how it scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRecord {
    pub id: AssessmentId,
    pub subject: SubjectName,
    pub assessed_at: DateTime<Utc>,
    pub questionnaire: Questionnaire,
    pub result: RiskResult,
}

impl AssessmentRecord {
    pub fn summary(&self) -> AssessmentSummaryView {
        let mut factors: Vec<&'static str> = self
            .questionnaire
            .factors
            .present()
            .into_iter()
            .map(|factor| factor.label())
            .collect();
        if factors.is_empty() {
            factors.push(NO_FACTORS_LABEL);
        }

        AssessmentSummaryView {
            assessment_id: self.id.clone(),
            assessed_at: self.assessed_at.format("%d.%m.%Y %H:%M").to_string(),
            subject: self.subject.to_string(),
            age: self.questionnaire.age,
            sex: self.questionnaire.sex.label(),
            measurements: format!(
                "{}kg/{}cm",
                self.questionnaire.weight_kg, self.questionnaire.height_cm
            ),
            factors,
            result: self.result.headline(),
            color: self.result.tier.color(),
        }
    }

    pub fn view(&self) -> AssessmentView {
        AssessmentView {
            summary: self.summary(),
            result: self.result.view(),
        }
    }
}

/// Storage abstraction owned by the caller; the engine never touches it.
pub trait AssessmentRepository: Send + Sync {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError>;
    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError>;
    /// Newest first, at most `limit` records.
    fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-local history. With a capacity set, the oldest record is evicted first.
#[derive(Debug, Default)]
pub struct InMemoryAssessmentRepository {
    records: Mutex<VecDeque<AssessmentRecord>>,
    capacity: Option<usize>,
}

impl InMemoryAssessmentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity: Some(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.records
            .lock()
            .map(|records| records.len())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, VecDeque<AssessmentRecord>>, RepositoryError> {
        self.records
            .lock()
            .map_err(|_| RepositoryError::Unavailable("history lock poisoned".to_string()))
    }
}

impl AssessmentRepository for InMemoryAssessmentRepository {
    fn insert(&self, record: AssessmentRecord) -> Result<AssessmentRecord, RepositoryError> {
        let mut records = self.lock()?;
        if records.iter().any(|existing| existing.id == record.id) {
            return Err(RepositoryError::Conflict);
        }
        if let Some(capacity) = self.capacity {
            if capacity == 0 {
                return Ok(record);
            }
            while records.len() >= capacity {
                records.pop_front();
            }
        }
        records.push_back(record.clone());
        Ok(record)
    }

    fn fetch(&self, id: &AssessmentId) -> Result<Option<AssessmentRecord>, RepositoryError> {
        let records = self.lock()?;
        Ok(records.iter().find(|record| &record.id == id).cloned())
    }

    fn recent(&self, limit: usize) -> Result<Vec<AssessmentRecord>, RepositoryError> {
        let records = self.lock()?;
        Ok(records.iter().rev().take(limit).cloned().collect())
    }
}

/// History line as shown to a reviewer.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentSummaryView {
    pub assessment_id: AssessmentId,
    pub assessed_at: String,
    pub subject: String,
    pub age: i32,
    pub sex: &'static str,
    pub measurements: String,
    pub factors: Vec<&'static str>,
    pub result: String,
    pub color: &'static str,
}

/// Summary plus the full scoring detail.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentView {
    #[serde(flatten)]
    pub summary: AssessmentSummaryView,
    #[serde(rename = "scoring")]
    pub result: RiskResultView,
}
