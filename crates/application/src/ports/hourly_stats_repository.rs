use async_trait::async_trait;
use chrono::NaiveDate;
use tollgate_domain::{DomainError, HourlyCount};

#[async_trait]
pub trait HourlyStatsRepository: Send + Sync {
    /// Add `counts` to the durable per-(customer, hour) totals in a single
    /// transaction. Existing totals are increased, never overwritten.
    async fn add_hourly_counts(&self, counts: &[HourlyCount]) -> Result<u64, DomainError>;

    /// Durable totals of `customer_id` for the UTC day `date`, hours ascending.
    async fn get_hourly_counts(
        &self,
        customer_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<HourlyCount>, DomainError>;
}
