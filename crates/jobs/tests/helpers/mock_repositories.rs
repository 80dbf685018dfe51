use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use tollgate_application::ports::{HourlyStatsRepository, ReferenceData, ReferenceDataRepository};
use tollgate_domain::{Customer, DomainError, HourlyCount};

// ============================================================================
// Mock ReferenceDataRepository
// ============================================================================

#[derive(Default)]
pub struct MockReferenceDataRepository {
    customers: Mutex<Vec<Customer>>,
    should_fail: AtomicBool,
    call_count: AtomicUsize,
}

impl MockReferenceDataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_customers(&self, customers: Vec<Customer>) {
        *self.customers.lock().unwrap() = customers;
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReferenceDataRepository for MockReferenceDataRepository {
    async fn fetch_reference_data(&self) -> Result<ReferenceData, DomainError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("Mock failure".to_string()));
        }
        Ok(ReferenceData {
            customers: self.customers.lock().unwrap().clone(),
            ..ReferenceData::default()
        })
    }
}

// ============================================================================
// Mock HourlyStatsRepository
// ============================================================================

/// Records every batch handed over by a flush.
#[derive(Default)]
pub struct MockHourlyStatsRepository {
    batches: Mutex<Vec<Vec<HourlyCount>>>,
    should_fail: AtomicBool,
}

impl MockHourlyStatsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn batches(&self) -> Vec<Vec<HourlyCount>> {
        self.batches.lock().unwrap().clone()
    }

    pub fn accepted_total(&self) -> u64 {
        self.batches
            .lock()
            .unwrap()
            .iter()
            .flatten()
            .map(|row| row.counts.accepted)
            .sum()
    }
}

#[async_trait]
impl HourlyStatsRepository for MockHourlyStatsRepository {
    async fn add_hourly_counts(&self, counts: &[HourlyCount]) -> Result<u64, DomainError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("Mock failure".to_string()));
        }
        self.batches.lock().unwrap().push(counts.to_vec());
        Ok(counts.len() as u64)
    }

    async fn get_hourly_counts(
        &self,
        _customer_id: i64,
        _date: NaiveDate,
    ) -> Result<Vec<HourlyCount>, DomainError> {
        Ok(Vec::new())
    }
}
