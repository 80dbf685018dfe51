use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tollgate_api::AppState;
use tollgate_application::ports::{
    EventProcessor, HourlyStatsRepository, ReferenceData, ReferenceDataRepository,
};
use tollgate_application::services::{ReferenceCache, StatsAggregator};
use tollgate_application::use_cases::IngestEventUseCase;
use tollgate_domain::{Cidr, Customer, DomainError, HourlyCount, ValidEvent};

pub struct StaticReferenceData(pub ReferenceData);

#[async_trait]
impl ReferenceDataRepository for StaticReferenceData {
    async fn fetch_reference_data(&self) -> Result<ReferenceData, DomainError> {
        Ok(self.0.clone())
    }
}

#[derive(Default)]
pub struct MockHourlyStatsRepository {
    rows: Mutex<Vec<HourlyCount>>,
    should_fail: AtomicBool,
}

impl MockHourlyStatsRepository {
    pub fn with_rows(rows: Vec<HourlyCount>) -> Self {
        Self {
            rows: Mutex::new(rows),
            ..Self::default()
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl HourlyStatsRepository for MockHourlyStatsRepository {
    async fn add_hourly_counts(&self, counts: &[HourlyCount]) -> Result<u64, DomainError> {
        self.rows.lock().unwrap().extend_from_slice(counts);
        Ok(counts.len() as u64)
    }

    async fn get_hourly_counts(
        &self,
        customer_id: i64,
        _date: NaiveDate,
    ) -> Result<Vec<HourlyCount>, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("Mock failure".to_string()));
        }
        let mut rows: Vec<HourlyCount> = self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|row| row.customer_id == customer_id)
            .copied()
            .collect();
        rows.sort_by_key(|row| row.hour);
        Ok(rows)
    }
}

pub struct NoopEventProcessor;

impl EventProcessor for NoopEventProcessor {
    fn process(&self, _event: &ValidEvent<'_>) {}
}

/// Customers 1 (active) and 2 (inactive); 10.0.0.0/8 and "Googlebot" blacklisted.
pub fn fixture_data() -> ReferenceData {
    ReferenceData {
        customers: vec![Customer::new(1, true), Customer::new(2, false)],
        ip_blacklist: vec!["10.0.0.0/8".parse::<Cidr>().unwrap()],
        user_agent_blacklist: vec!["Googlebot".to_string()],
    }
}

pub async fn app_state(store: Arc<MockHourlyStatsRepository>, loaded: bool) -> AppState {
    let cache = Arc::new(ReferenceCache::new(Arc::new(StaticReferenceData(
        fixture_data(),
    ))));
    if loaded {
        cache.reload().await.unwrap();
    }
    let stats = Arc::new(StatsAggregator::new(store));
    let ingest = Arc::new(IngestEventUseCase::new(
        cache.clone(),
        stats.clone(),
        Arc::new(NoopEventProcessor),
    ));

    AppState {
        ingest,
        stats,
        cache,
    }
}
