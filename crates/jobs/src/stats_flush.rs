use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tollgate_application::services::StatsAggregator;
use tracing::{debug, info};

/// Periodically hands the live hourly counters to durable storage.
///
/// On shutdown one last flush runs before the task exits, so awaiting the
/// returned handle guarantees pending counts were offered to the store.
pub struct StatsFlushJob {
    stats: Arc<StatsAggregator>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl StatsFlushJob {
    pub fn new(stats: Arc<StatsAggregator>) -> Self {
        Self {
            stats,
            interval: Duration::from_secs(10),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) -> JoinHandle<()> {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            "Starting stats flush job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("StatsFlushJob: final flush before shutdown");
                        self.flush().await;
                        break;
                    }
                    _ = interval.tick() => self.flush().await,
                }
            }
        })
    }

    async fn flush(&self) {
        if let Err(e) = self.stats.flush_snapshot().await {
            debug!(error = %e, "StatsFlushJob: flush skipped");
        }
    }
}
