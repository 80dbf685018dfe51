use crate::ports::{ReferenceData, ReferenceDataRepository};
use arc_swap::ArcSwapOption;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;
use tollgate_domain::{CustomerStatus, DomainError, PatternMatcher, PrefixSet};
use tracing::{error, info};

/// Immutable bundle of reference data: customer status, address blacklist and
/// user-agent blacklist, always built and installed together.
pub struct ReferenceSnapshot {
    version: u64,
    customers: FxHashMap<i64, bool>,
    address_blacklist: PrefixSet,
    user_agent_blacklist: PatternMatcher,
}

impl ReferenceSnapshot {
    pub fn build(version: u64, data: &ReferenceData) -> Self {
        let customers = data.customers.iter().map(|c| (c.id, c.active)).collect();
        let address_blacklist = data.ip_blacklist.iter().collect();
        let user_agent_blacklist = PatternMatcher::new(&data.user_agent_blacklist);

        Self {
            version,
            customers,
            address_blacklist,
            user_agent_blacklist,
        }
    }

    /// Monotonic tag assigned by the reload that built this snapshot.
    pub fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub fn customer_status(&self, customer_id: i64) -> CustomerStatus {
        CustomerStatus::from_flag(self.customers.get(&customer_id).copied())
    }

    #[inline]
    pub fn customer_exists(&self, customer_id: i64) -> bool {
        self.customers.contains_key(&customer_id)
    }

    #[inline]
    pub fn is_address_blacklisted(&self, address: u32) -> bool {
        self.address_blacklist.contains(address)
    }

    #[inline]
    pub fn is_user_agent_blacklisted(&self, user_agent: &str) -> bool {
        self.user_agent_blacklist.is_match(user_agent)
    }

    pub fn customer_count(&self) -> usize {
        self.customers.len()
    }

    pub fn blacklisted_range_count(&self) -> usize {
        self.address_blacklist.len()
    }

    pub fn blacklisted_user_agent_count(&self) -> usize {
        self.user_agent_blacklist.pattern_count()
    }
}

/// Reloadable cache of reference data.
///
/// The current [`ReferenceSnapshot`] is swapped atomically via `ArcSwapOption`
/// during `reload()`; readers never block and always see one complete
/// snapshot. Until the first successful reload every query fails with
/// [`DomainError::NotReady`].
pub struct ReferenceCache {
    current: ArcSwapOption<ReferenceSnapshot>,
    source: Arc<dyn ReferenceDataRepository>,
    versions: AtomicU64,
    /// Serialises reloads; readers never take it.
    reload_lock: Mutex<()>,
}

impl ReferenceCache {
    pub fn new(source: Arc<dyn ReferenceDataRepository>) -> Self {
        Self {
            current: ArcSwapOption::empty(),
            source,
            versions: AtomicU64::new(0),
            reload_lock: Mutex::new(()),
        }
    }

    /// The installed snapshot. Hold on to it to answer several questions
    /// against the same consistent data.
    #[inline]
    pub fn snapshot(&self) -> Result<Arc<ReferenceSnapshot>, DomainError> {
        self.current.load_full().ok_or(DomainError::NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.current.load().is_some()
    }

    pub fn version(&self) -> Option<u64> {
        self.with_snapshot(|s| s.version()).ok()
    }

    pub fn customer_status(&self, customer_id: i64) -> Result<CustomerStatus, DomainError> {
        self.with_snapshot(|s| s.customer_status(customer_id))
    }

    pub fn customer_exists(&self, customer_id: i64) -> Result<bool, DomainError> {
        self.with_snapshot(|s| s.customer_exists(customer_id))
    }

    pub fn is_address_blacklisted(&self, address: u32) -> Result<bool, DomainError> {
        self.with_snapshot(|s| s.is_address_blacklisted(address))
    }

    pub fn is_user_agent_blacklisted(&self, user_agent: &str) -> Result<bool, DomainError> {
        self.with_snapshot(|s| s.is_user_agent_blacklisted(user_agent))
    }

    #[inline]
    fn with_snapshot<R>(&self, f: impl FnOnce(&ReferenceSnapshot) -> R) -> Result<R, DomainError> {
        let guard = self.current.load();
        guard.as_deref().map(f).ok_or(DomainError::NotReady)
    }

    /// Fetch all reference data, build a new snapshot off to the side and
    /// install it in one atomic swap.
    ///
    /// On a data-source error nothing is installed and the previous snapshot
    /// stays authoritative. Returns the version of the installed snapshot.
    pub async fn reload(&self) -> Result<u64, DomainError> {
        let _reloading = self.reload_lock.lock().await;
        info!("Reference data reload started");

        let data = self.source.fetch_reference_data().await.map_err(|e| {
            error!(error = %e, "Reference data reload failed, keeping previous snapshot");
            e
        })?;

        let version = self.versions.fetch_add(1, Ordering::Relaxed) + 1;
        let snapshot = ReferenceSnapshot::build(version, &data);

        info!(
            version,
            customers = snapshot.customer_count(),
            blacklisted_ranges = snapshot.blacklisted_range_count(),
            blacklisted_user_agents = snapshot.blacklisted_user_agent_count(),
            "Reference data reloaded"
        );

        self.current.store(Some(Arc::new(snapshot)));
        Ok(version)
    }
}
