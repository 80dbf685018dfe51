use crate::cidr::parse_ipv4;
use chrono::DateTime;
use thiserror::Error;

/// An inbound event as handed over by the request decoder. Every field may be
/// missing; [`IngestEvent::validate`] decides whether it is well formed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestEvent {
    pub customer_id: Option<i64>,
    pub tag_id: Option<i64>,
    pub user_id: Option<String>,
    pub remote_ip: Option<String>,
    pub timestamp: Option<i64>,
    /// Not mandatory: an event without a user agent is never UA-blacklisted.
    pub user_agent: Option<String>,
}

/// A structurally valid event, borrowing from the [`IngestEvent`] it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidEvent<'a> {
    pub customer_id: i64,
    pub tag_id: i64,
    pub user_id: &'a str,
    /// Origin address as a 32-bit integer.
    pub remote_ip: u32,
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub user_agent: Option<&'a str>,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("missing mandatory field: {0}")]
    MissingField(&'static str),

    #[error("remote address is not a dotted-quad IPv4 address: {0}")]
    InvalidAddress(String),

    #[error("timestamp out of range: {0}")]
    TimestampOutOfRange(i64),
}

impl IngestEvent {
    pub fn validate(&self) -> Result<ValidEvent<'_>, ValidationError> {
        let customer_id = self
            .customer_id
            .ok_or(ValidationError::MissingField("customerID"))?;
        let tag_id = self.tag_id.ok_or(ValidationError::MissingField("tagID"))?;
        let user_id = self
            .user_id
            .as_deref()
            .ok_or(ValidationError::MissingField("userID"))?;
        let remote_ip = self
            .remote_ip
            .as_deref()
            .ok_or(ValidationError::MissingField("remoteIP"))?;
        let timestamp = self
            .timestamp
            .ok_or(ValidationError::MissingField("timestamp"))?;

        let remote_ip = parse_ipv4(remote_ip)
            .map_err(|_| ValidationError::InvalidAddress(remote_ip.to_string()))?;

        if DateTime::from_timestamp(timestamp, 0).is_none() {
            return Err(ValidationError::TimestampOutOfRange(timestamp));
        }

        Ok(ValidEvent {
            customer_id,
            tag_id,
            user_id,
            remote_ip,
            timestamp,
            user_agent: self.user_agent.as_deref(),
        })
    }
}
