use crate::ports::EventProcessor;
use crate::services::{ReferenceCache, StatsAggregator};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tollgate_domain::{
    AdmissionDecision, CustomerStatus, DomainError, IngestEvent, RejectReason, ValidationError,
};
use tracing::debug;

/// Per-event admission pipeline.
///
/// Checks run in a fixed order and the first failing one decides:
///
/// 1. malformed event → `Invalid` (counted only for a known customer)
/// 2. customer absent from the snapshot → `UnknownCustomer` (never counted)
/// 3. customer inactive → `CustomerInactive`
/// 4. origin address blacklisted → `BlacklistedAddress`
/// 5. user agent blacklisted → `BlacklistedUserAgent`
///
/// Every other event is accepted, counted and passed to the processor.
/// The only error is [`DomainError::NotReady`], returned when no reference
/// snapshot has been loaded yet.
pub struct IngestEventUseCase {
    cache: Arc<ReferenceCache>,
    stats: Arc<StatsAggregator>,
    processor: Arc<dyn EventProcessor>,
}

impl IngestEventUseCase {
    pub fn new(
        cache: Arc<ReferenceCache>,
        stats: Arc<StatsAggregator>,
        processor: Arc<dyn EventProcessor>,
    ) -> Self {
        Self {
            cache,
            stats,
            processor,
        }
    }

    pub fn execute(&self, event: &IngestEvent) -> Result<AdmissionDecision, DomainError> {
        self.execute_at(event, Utc::now().timestamp())
    }

    /// Same as [`execute`](Self::execute) with an explicit clock, used to
    /// bucket malformed events that carry no usable timestamp.
    pub fn execute_at(
        &self,
        event: &IngestEvent,
        now: i64,
    ) -> Result<AdmissionDecision, DomainError> {
        let valid = match event.validate() {
            Ok(valid) => valid,
            Err(e) => return self.reject_malformed(event, &e, now),
        };

        // One snapshot for every check of this event.
        let snapshot = self.cache.snapshot()?;
        let customer_id = valid.customer_id;

        let rejection = match snapshot.customer_status(customer_id) {
            CustomerStatus::Unknown => {
                debug!(customer_id, "Event rejected: unknown customer");
                return Ok(AdmissionDecision::Rejected(RejectReason::UnknownCustomer));
            }
            CustomerStatus::Inactive => Some(RejectReason::CustomerInactive),
            CustomerStatus::Active if snapshot.is_address_blacklisted(valid.remote_ip) => {
                Some(RejectReason::BlacklistedAddress)
            }
            CustomerStatus::Active
                if valid
                    .user_agent
                    .is_some_and(|ua| snapshot.is_user_agent_blacklisted(ua)) =>
            {
                Some(RejectReason::BlacklistedUserAgent)
            }
            CustomerStatus::Active => None,
        };

        match rejection {
            Some(reason) => {
                self.stats.record_rejected(valid.timestamp, customer_id);
                debug!(customer_id, reason = %reason, "Event rejected");
                Ok(AdmissionDecision::Rejected(reason))
            }
            None => {
                self.stats.record_accepted(valid.timestamp, customer_id);
                self.processor.process(&valid);
                Ok(AdmissionDecision::Accepted)
            }
        }
    }

    fn reject_malformed(
        &self,
        event: &IngestEvent,
        error: &ValidationError,
        now: i64,
    ) -> Result<AdmissionDecision, DomainError> {
        let decision = AdmissionDecision::Rejected(RejectReason::Invalid);

        let Some(customer_id) = event.customer_id else {
            debug!(error = %error, "Malformed event without customer");
            return Ok(decision);
        };

        if self.cache.snapshot()?.customer_exists(customer_id) {
            let timestamp = event
                .timestamp
                .filter(|&ts| DateTime::from_timestamp(ts, 0).is_some())
                .unwrap_or(now);
            self.stats.record_rejected(timestamp, customer_id);
        }

        debug!(customer_id, error = %error, "Malformed event rejected");
        Ok(decision)
    }
}
