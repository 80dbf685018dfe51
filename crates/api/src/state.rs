use std::sync::Arc;
use tollgate_application::services::{ReferenceCache, StatsAggregator};
use tollgate_application::use_cases::IngestEventUseCase;

#[derive(Clone)]
pub struct AppState {
    pub ingest: Arc<IngestEventUseCase>,
    pub stats: Arc<StatsAggregator>,
    pub cache: Arc<ReferenceCache>,
}
