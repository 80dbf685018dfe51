use crate::{ReferenceReloadJob, StatsFlushJob};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::info;

/// Central orchestrator for all background jobs.
///
/// Use the builder pattern to register jobs, then call `.start()` once.
///
/// # Example
///
/// ```rust,ignore
/// let handles = JobRunner::new()
///     .with_reference_reload(ReferenceReloadJob::new(cache).with_cancellation(token.clone()))
///     .with_stats_flush(StatsFlushJob::new(stats).with_cancellation(token.clone()))
///     .start()
///     .await;
/// ```
pub struct JobRunner {
    reference_reload: Option<ReferenceReloadJob>,
    stats_flush: Option<StatsFlushJob>,
}

impl JobRunner {
    pub fn new() -> Self {
        Self {
            reference_reload: None,
            stats_flush: None,
        }
    }

    pub fn with_reference_reload(mut self, job: ReferenceReloadJob) -> Self {
        self.reference_reload = Some(job);
        self
    }

    pub fn with_stats_flush(mut self, job: StatsFlushJob) -> Self {
        self.stats_flush = Some(job);
        self
    }

    /// Start all registered background jobs. The returned handles complete
    /// once each job has observed its cancellation token.
    pub async fn start(self) -> Vec<JoinHandle<()>> {
        info!("Starting background job runner");
        let mut handles = Vec::new();

        if let Some(job) = self.reference_reload {
            handles.push(Arc::new(job).start().await);
        }

        if let Some(job) = self.stats_flush {
            handles.push(Arc::new(job).start().await);
        }

        info!(jobs = handles.len(), "All background jobs started");
        handles
    }
}

impl Default for JobRunner {
    fn default() -> Self {
        Self::new()
    }
}
