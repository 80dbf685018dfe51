use crate::ports::HourlyStatsRepository;
use arc_swap::ArcSwap;
use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tollgate_domain::stats::{day_bounds, hour_start};
use tollgate_domain::{BucketKey, Counts, DomainError, HourlyCount, StatsReport};
use tracing::{debug, error, info, instrument};

/// Live counters of one (hour, customer) bucket.
#[derive(Debug, Default)]
pub struct BucketCounters {
    accepted: AtomicU64,
    rejected: AtomicU64,
}

impl BucketCounters {
    #[inline]
    fn bump(&self, accepted: bool) {
        let counter = if accepted {
            &self.accepted
        } else {
            &self.rejected
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    fn load(&self) -> Counts {
        Counts::new(
            self.accepted.load(Ordering::Relaxed),
            self.rejected.load(Ordering::Relaxed),
        )
    }

    fn into_counts(self) -> Counts {
        Counts::new(self.accepted.into_inner(), self.rejected.into_inner())
    }
}

type CounterTable = DashMap<BucketKey, BucketCounters, FxBuildHasher>;

fn empty_table() -> CounterTable {
    DashMap::with_hasher(FxBuildHasher)
}

/// Concurrent per-(hour, customer) accepted/rejected counters.
///
/// Increments go to the currently installed table. `flush_snapshot()` swaps
/// in an empty table and hands the detached one to durable storage, where
/// it is added to the existing totals.
pub struct StatsAggregator {
    live: ArcSwap<CounterTable>,
    store: Arc<dyn HourlyStatsRepository>,
    flush_lock: Mutex<()>,
}

impl StatsAggregator {
    pub fn new(store: Arc<dyn HourlyStatsRepository>) -> Self {
        Self {
            live: ArcSwap::from_pointee(empty_table()),
            store,
            flush_lock: Mutex::new(()),
        }
    }

    #[inline]
    pub fn record_accepted(&self, timestamp: i64, customer_id: i64) {
        self.record(BucketKey::new(timestamp, customer_id), true);
    }

    #[inline]
    pub fn record_rejected(&self, timestamp: i64, customer_id: i64) {
        self.record(BucketKey::new(timestamp, customer_id), false);
    }

    #[inline]
    fn record(&self, key: BucketKey, accepted: bool) {
        let table = self.live.load();

        // Existing buckets only need a shard read lock.
        if let Some(counters) = table.get(&key) {
            counters.bump(accepted);
            return;
        }
        table.entry(key).or_default().bump(accepted);
    }

    /// Detach the live table, install an empty one and add the detached
    /// counts to durable storage in one unit of work.
    ///
    /// Returns the number of buckets written. When the store rejects the
    /// write the detached counts are dropped and the error is returned; the
    /// fresh live table is unaffected.
    #[instrument(skip(self), name = "stats_flush")]
    pub async fn flush_snapshot(&self) -> Result<usize, DomainError> {
        let _flushing = self.flush_lock.lock().await;

        let mut detached = self.live.swap(Arc::new(empty_table()));

        // Writers that loaded the old table before the swap still hold a
        // reference; wait for them so their increments are included.
        let table = loop {
            match Arc::try_unwrap(detached) {
                Ok(table) => break table,
                Err(shared) => {
                    detached = shared;
                    tokio::task::yield_now().await;
                }
            }
        };

        let mut batch: Vec<HourlyCount> = table
            .into_iter()
            .map(|(key, counters)| HourlyCount::new(key, counters.into_counts()))
            .filter(|row| !row.counts.is_zero())
            .collect();

        if batch.is_empty() {
            debug!("No live counters to flush");
            return Ok(0);
        }
        batch.sort_unstable_by_key(HourlyCount::key);

        match self.store.add_hourly_counts(&batch).await {
            Ok(rows) => {
                info!(buckets = batch.len(), rows, "Hourly counters flushed");
                Ok(batch.len())
            }
            Err(e) => {
                error!(
                    error = %e,
                    buckets = batch.len(),
                    "Failed to flush hourly counters, dropping this interval"
                );
                Err(e)
            }
        }
    }

    /// Not-yet-flushed counts of one bucket.
    pub fn live_counts(&self, key: BucketKey) -> Option<Counts> {
        self.live.load().get(&key).map(|c| c.load())
    }

    pub fn live_bucket_count(&self) -> usize {
        self.live.load().len()
    }

    /// Sum of every not-yet-flushed bucket.
    pub fn live_totals(&self) -> Counts {
        self.live
            .load()
            .iter()
            .fold(Counts::default(), |acc, entry| acc + entry.value().load())
    }

    pub async fn report(
        &self,
        date: NaiveDate,
        customer_id: i64,
    ) -> Result<StatsReport, DomainError> {
        self.report_at(date, customer_id, Utc::now().timestamp())
            .await
    }

    /// Durable hourly totals of `customer_id` on `date`, plus the live counts
    /// of the hour containing `now` when that hour falls on `date`.
    ///
    /// A flush running concurrently may make the current hour briefly appear
    /// twice or not at all.
    #[instrument(skip(self))]
    pub async fn report_at(
        &self,
        date: NaiveDate,
        customer_id: i64,
        now: i64,
    ) -> Result<StatsReport, DomainError> {
        let durable = self.store.get_hourly_counts(customer_id, date).await?;

        let mut report = StatsReport::new(customer_id);
        for row in durable {
            report.add(row.hour, row.counts);
        }

        let (start, end) = day_bounds(date);
        let current_hour = hour_start(now);
        if (start..end).contains(&current_hour) {
            if let Some(live) = self.live_counts(BucketKey::new(current_hour, customer_id)) {
                if !live.is_zero() {
                    report.add(current_hour, live);
                }
            }
        }

        debug!(
            hours = report.hourly.len(),
            requests = report.total.total(),
            "Report assembled"
        );
        Ok(report)
    }
}
