use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Service is not ready")]
    NotReady,

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid CIDR: {0}")]
    InvalidCidr(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}
