use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use tollgate_application::ports::HourlyStatsRepository;
use tollgate_domain::stats::day_bounds;
use tollgate_domain::{Counts, DomainError, HourlyCount};
use tracing::{debug, error, instrument};

type HourlyRow = (i64, i64, i64);

const UPSERT_HOURLY: &str = "INSERT INTO hourly_stats (customer_id, time, request_count, invalid_count)
     VALUES (?, ?, ?, ?)
     ON CONFLICT(customer_id, time) DO UPDATE SET
         request_count = request_count + excluded.request_count,
         invalid_count = invalid_count + excluded.invalid_count";

pub struct SqliteHourlyStatsRepository {
    pool: SqlitePool,
}

impl SqliteHourlyStatsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[inline]
fn to_column(count: u64) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

#[inline]
fn from_column(count: i64) -> u64 {
    u64::try_from(count).unwrap_or(0)
}

#[async_trait]
impl HourlyStatsRepository for SqliteHourlyStatsRepository {
    #[instrument(skip(self, counts), fields(buckets = counts.len()))]
    async fn add_hourly_counts(&self, counts: &[HourlyCount]) -> Result<u64, DomainError> {
        if counts.is_empty() {
            return Ok(0);
        }

        let mut tx = self.pool.begin().await.map_err(|e| {
            error!(error = %e, "Failed to begin hourly stats transaction");
            DomainError::DatabaseError(e.to_string())
        })?;

        let mut rows = 0;
        for row in counts {
            let result = sqlx::query(UPSERT_HOURLY)
                .bind(row.customer_id)
                .bind(row.hour)
                .bind(to_column(row.counts.accepted))
                .bind(to_column(row.counts.rejected))
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    error!(
                        error = %e,
                        customer_id = row.customer_id,
                        hour = row.hour,
                        "Failed to upsert hourly stats"
                    );
                    DomainError::DatabaseError(e.to_string())
                })?;
            rows += result.rows_affected();
        }

        // dropping an uncommitted transaction rolls it back
        tx.commit().await.map_err(|e| {
            error!(error = %e, "Failed to commit hourly stats");
            DomainError::DatabaseError(e.to_string())
        })?;

        debug!(rows, "Hourly stats upserted");
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn get_hourly_counts(
        &self,
        customer_id: i64,
        date: NaiveDate,
    ) -> Result<Vec<HourlyCount>, DomainError> {
        let (start, end) = day_bounds(date);

        let rows = sqlx::query_as::<_, HourlyRow>(
            "SELECT time, request_count, invalid_count
             FROM hourly_stats
             WHERE customer_id = ? AND time >= ? AND time < ?
             ORDER BY time ASC",
        )
        .bind(customer_id)
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(error = %e, "Failed to query hourly stats");
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(rows
            .into_iter()
            .map(|(hour, requests, invalid)| HourlyCount {
                customer_id,
                hour,
                counts: Counts::new(from_column(requests), from_column(invalid)),
            })
            .collect())
    }
}
