use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::RwLock;
use tollgate_application::ports::{
    EventProcessor, HourlyStatsRepository, ReferenceData, ReferenceDataRepository,
};
use tollgate_domain::stats::day_bounds;
use tollgate_domain::{BucketKey, Cidr, Counts, Customer, DomainError, HourlyCount, ValidEvent};

// ============================================================================
// Mock ReferenceDataRepository
// ============================================================================

#[derive(Clone, Default)]
pub struct MockReferenceDataRepository {
    data: Arc<RwLock<ReferenceData>>,
    should_fail: Arc<RwLock<bool>>,
    call_count: Arc<AtomicUsize>,
}

impl MockReferenceDataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_data(data: ReferenceData) -> Self {
        Self {
            data: Arc::new(RwLock::new(data)),
            ..Self::default()
        }
    }

    pub async fn set_data(&self, data: ReferenceData) {
        *self.data.write().await = data;
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReferenceDataRepository for MockReferenceDataRepository {
    async fn fetch_reference_data(&self) -> Result<ReferenceData, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);

        if *self.should_fail.read().await {
            return Err(DomainError::DatabaseError(
                "Mock reference store unavailable".to_string(),
            ));
        }
        Ok(self.data.read().await.clone())
    }
}

// ============================================================================
// Mock HourlyStatsRepository
// ============================================================================

/// Keeps additive durable totals in memory, keyed like the real table.
#[derive(Clone, Default)]
pub struct MockHourlyStatsRepository {
    totals: Arc<RwLock<BTreeMap<BucketKey, Counts>>>,
    should_fail: Arc<RwLock<bool>>,
    write_count: Arc<AtomicUsize>,
}

impl MockHourlyStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_should_fail(&self, should_fail: bool) {
        *self.should_fail.write().await = should_fail;
    }

    pub async fn seed(&self, row: HourlyCount) {
        *self.totals.write().await.entry(row.key()).or_default() += row.counts;
    }

    pub async fn counts(&self, key: BucketKey) -> Option<Counts> {
        self.totals.read().await.get(&key).copied()
    }

    /// Sum of every durable row.
    pub async fn grand_total(&self) -> Counts {
        self.totals
            .read()
            .await
            .values()
            .fold(Counts::default(), |acc, c| acc + *c)
    }

    pub fn write_count(&self) -> usize {
        self.write_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HourlyStatsRepository for MockHourlyStatsRepository {
    async fn add_hourly_counts(&self, counts: &[HourlyCount]) -> Result<u64, DomainError> {
        self.write_count.fetch_add(1, Ordering::SeqCst);

        if *self.should_fail.read().await {
            return Err(DomainError::DatabaseError(
                "Mock stats store unavailable".to_string(),
            ));
        }

        let mut totals = self.totals.write().await;
        for row in counts {
            *totals.entry(row.key()).or_default() += row.counts;
        }
        Ok(counts.len() as u64)
    }

    async fn get_hourly_counts(
        &self,
        customer_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<HourlyCount>, DomainError> {
        if *self.should_fail.read().await {
            return Err(DomainError::DatabaseError(
                "Mock stats store unavailable".to_string(),
            ));
        }

        let (start, end) = day_bounds(date);
        Ok(self
            .totals
            .read()
            .await
            .iter()
            .filter(|(key, _)| key.customer_id == customer_id && (start..end).contains(&key.hour))
            .map(|(key, counts)| HourlyCount::new(*key, *counts))
            .collect())
    }
}

// ============================================================================
// Recording EventProcessor
// ============================================================================

#[derive(Default)]
pub struct RecordingEventProcessor {
    processed: AtomicU64,
    last: Mutex<Option<(i64, i64, String)>>,
}

impl RecordingEventProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::SeqCst)
    }

    /// (customer id, tag id, user id) of the last processed event.
    pub fn last(&self) -> Option<(i64, i64, String)> {
        self.last.lock().unwrap().clone()
    }
}

impl EventProcessor for RecordingEventProcessor {
    fn process(&self, event: &ValidEvent<'_>) {
        self.processed.fetch_add(1, Ordering::SeqCst);
        *self.last.lock().unwrap() =
            Some((event.customer_id, event.tag_id, event.user_id.to_string()));
    }
}

// ============================================================================
// Fixtures
// ============================================================================

pub fn reference_data(
    customers: &[(i64, bool)],
    ip_blacklist: &[&str],
    user_agents: &[&str],
) -> ReferenceData {
    ReferenceData {
        customers: customers
            .iter()
            .map(|&(id, active)| Customer::new(id, active))
            .collect(),
        ip_blacklist: ip_blacklist
            .iter()
            .map(|s| s.parse::<Cidr>().unwrap())
            .collect(),
        user_agent_blacklist: user_agents.iter().map(|s| s.to_string()).collect(),
    }
}
