use covid_risk::assessment::InMemoryAssessmentRepository;
use covid_risk::config::HistoryConfig;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn build_repository(config: &HistoryConfig) -> InMemoryAssessmentRepository {
    match config.capacity {
        Some(capacity) => InMemoryAssessmentRepository::with_capacity(capacity),
        None => InMemoryAssessmentRepository::new(),
    }
}
