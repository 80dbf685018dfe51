use async_trait::async_trait;
use tollgate_domain::{Cidr, Customer, DomainError};

/// Everything a reference snapshot is built from, read in one go.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub customers: Vec<Customer>,
    pub ip_blacklist: Vec<Cidr>,
    pub user_agent_blacklist: Vec<String>,
}

#[async_trait]
pub trait ReferenceDataRepository: Send + Sync {
    /// Fetch the full customer table, CIDR blacklist and user-agent blacklist
    /// from a single consistent view of the store.
    async fn fetch_reference_data(&self) -> Result<ReferenceData, DomainError>;
}
