use super::Repositories;
use std::sync::Arc;
use tollgate_api::AppState;
use tollgate_application::services::{ReferenceCache, StatsAggregator};
use tollgate_application::use_cases::IngestEventUseCase;
use tollgate_infrastructure::processing::LoggingEventProcessor;

/// Process-wide singletons shared by the HTTP handlers and the jobs.
pub struct Services {
    pub cache: Arc<ReferenceCache>,
    pub stats: Arc<StatsAggregator>,
    pub ingest: Arc<IngestEventUseCase>,
}

impl Services {
    pub fn new(repos: &Repositories) -> Self {
        let cache = Arc::new(ReferenceCache::new(repos.reference_data.clone()));
        let stats = Arc::new(StatsAggregator::new(repos.hourly_stats.clone()));
        let ingest = Arc::new(IngestEventUseCase::new(
            cache.clone(),
            stats.clone(),
            Arc::new(LoggingEventProcessor::new()),
        ));

        Self {
            cache,
            stats,
            ingest,
        }
    }

    pub fn app_state(&self) -> AppState {
        AppState {
            ingest: self.ingest.clone(),
            stats: self.stats.clone(),
            cache: self.cache.clone(),
        }
    }
}
