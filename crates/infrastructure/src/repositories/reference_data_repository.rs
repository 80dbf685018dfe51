use async_trait::async_trait;
use sqlx::SqlitePool;
use tollgate_application::ports::{ReferenceData, ReferenceDataRepository};
use tollgate_domain::{Cidr, Customer, DomainError};
use tracing::{debug, error, instrument, warn};

type CustomerRow = (i64, bool);
type RangeRow = (i64, i64);

pub struct SqliteReferenceDataRepository {
    pool: SqlitePool,
}

impl SqliteReferenceDataRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Rows outside the unsigned 32-bit / `0..=32` ranges are skipped.
    fn row_to_cidr((address, netmask_bits): RangeRow) -> Option<Cidr> {
        let address = u32::try_from(address).ok()?;
        let prefix_len = u8::try_from(netmask_bits).ok()?;
        Cidr::new(address, prefix_len).ok()
    }
}

#[async_trait]
impl ReferenceDataRepository for SqliteReferenceDataRepository {
    #[instrument(skip(self))]
    async fn fetch_reference_data(&self) -> Result<ReferenceData, DomainError> {
        // one transaction, so all three tables come from the same state
        let mut tx = self.pool.begin().await.map_err(|e| {
            error!(error = %e, "Failed to begin reference data transaction");
            DomainError::DatabaseError(e.to_string())
        })?;

        let customers = sqlx::query_as::<_, CustomerRow>("SELECT id, active FROM customer")
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query customers");
                DomainError::DatabaseError(e.to_string())
            })?;

        let ranges =
            sqlx::query_as::<_, RangeRow>("SELECT address, netmask_bits FROM ip_blacklist")
                .fetch_all(&mut *tx)
                .await
                .map_err(|e| {
                    error!(error = %e, "Failed to query ip blacklist");
                    DomainError::DatabaseError(e.to_string())
                })?;

        let user_agents = sqlx::query_scalar::<_, String>("SELECT ua FROM ua_blacklist")
            .fetch_all(&mut *tx)
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to query user agent blacklist");
                DomainError::DatabaseError(e.to_string())
            })?;

        tx.commit().await.map_err(|e| {
            error!(error = %e, "Failed to close reference data transaction");
            DomainError::DatabaseError(e.to_string())
        })?;

        let range_rows = ranges.len();
        let ip_blacklist: Vec<Cidr> = ranges
            .into_iter()
            .filter_map(Self::row_to_cidr)
            .collect();
        if ip_blacklist.len() < range_rows {
            warn!(
                skipped = range_rows - ip_blacklist.len(),
                "Ignoring malformed ip blacklist rows"
            );
        }

        debug!(
            customers = customers.len(),
            ranges = ip_blacklist.len(),
            user_agents = user_agents.len(),
            "Reference data fetched"
        );

        Ok(ReferenceData {
            customers: customers
                .into_iter()
                .map(|(id, active)| Customer::new(id, active))
                .collect(),
            ip_blacklist,
            user_agent_blacklist: user_agents,
        })
    }
}
