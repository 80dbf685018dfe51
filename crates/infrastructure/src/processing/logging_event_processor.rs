use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicU64, Ordering};
use tollgate_application::ports::EventProcessor;
use tollgate_domain::ValidEvent;
use tracing::debug;

/// Downstream stage for accepted events: counts them and logs each one at
/// debug level. Stands in for real processing.
#[derive(Debug, Default)]
pub struct LoggingEventProcessor {
    processed: AtomicU64,
}

impl LoggingEventProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }
}

impl EventProcessor for LoggingEventProcessor {
    fn process(&self, event: &ValidEvent<'_>) {
        self.processed.fetch_add(1, Ordering::Relaxed);
        debug!(
            customer_id = event.customer_id,
            tag_id = event.tag_id,
            user_id = event.user_id,
            remote_ip = %Ipv4Addr::from(event.remote_ip),
            timestamp = event.timestamp,
            "Processing accepted event"
        );
    }
}
