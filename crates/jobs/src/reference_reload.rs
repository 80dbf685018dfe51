use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tollgate_application::services::ReferenceCache;
use tracing::{debug, info};

/// Periodically rebuilds the reference snapshot from the backing store.
///
/// A failed reload is logged and skipped; the previous snapshot stays in
/// place until the next tick.
pub struct ReferenceReloadJob {
    cache: Arc<ReferenceCache>,
    interval: Duration,
    shutdown: CancellationToken,
}

impl ReferenceReloadJob {
    pub fn new(cache: Arc<ReferenceCache>) -> Self {
        Self {
            cache,
            interval: Duration::from_secs(60),
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
            "Starting reference reload job"
        );

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // start-up performs the first reload itself
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("ReferenceReloadJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        if let Err(e) = self.cache.reload().await {
                            debug!(error = %e, "ReferenceReloadJob: reload skipped");
                        }
                    }
                }
            }
        })
    }
}
