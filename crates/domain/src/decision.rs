use std::fmt;

/// Why an event was turned away. Codes are stable and enumerable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RejectReason {
    Invalid,
    UnknownCustomer,
    CustomerInactive,
    BlacklistedAddress,
    BlacklistedUserAgent,
}

impl RejectReason {
    pub const ALL: [RejectReason; 5] = [
        RejectReason::Invalid,
        RejectReason::UnknownCustomer,
        RejectReason::CustomerInactive,
        RejectReason::BlacklistedAddress,
        RejectReason::BlacklistedUserAgent,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            RejectReason::Invalid => "invalid",
            RejectReason::UnknownCustomer => "unknown_customer",
            RejectReason::CustomerInactive => "customer_inactive",
            RejectReason::BlacklistedAddress => "blacklisted_address",
            RejectReason::BlacklistedUserAgent => "blacklisted_user_agent",
        }
    }

    /// Human readable message returned to the client.
    pub fn message(&self) -> &'static str {
        match self {
            RejectReason::Invalid => "Missing mandatory fields",
            RejectReason::UnknownCustomer => "Customer not found",
            RejectReason::CustomerInactive => "Customer is not active",
            RejectReason::BlacklistedAddress => "IP address blacklisted",
            RejectReason::BlacklistedUserAgent => "UserAgent blacklisted",
        }
    }
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of the admission pipeline for one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdmissionDecision {
    Accepted,
    Rejected(RejectReason),
}

impl AdmissionDecision {
    pub fn is_accepted(&self) -> bool {
        matches!(self, AdmissionDecision::Accepted)
    }

    pub fn reject_reason(&self) -> Option<RejectReason> {
        match self {
            AdmissionDecision::Accepted => None,
            AdmissionDecision::Rejected(reason) => Some(*reason),
        }
    }
}
