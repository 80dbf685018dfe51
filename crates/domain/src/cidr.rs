use crate::errors::DomainError;
use ipnetwork::Ipv4Network;
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// An IPv4 range as stored in the address blacklist: a 32-bit address and a
/// prefix length in `0..=32`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cidr {
    address: u32,
    prefix_len: u8,
}

impl Cidr {
    pub fn new(address: u32, prefix_len: u8) -> Result<Self, DomainError> {
        if prefix_len > 32 {
            return Err(DomainError::InvalidCidr(format!(
                "{}/{prefix_len}: prefix length must be between 0 and 32",
                Ipv4Addr::from(address)
            )));
        }
        Ok(Self {
            address,
            prefix_len,
        })
    }

    pub fn address(&self) -> u32 {
        self.address
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    pub fn contains(&self, address: u32) -> bool {
        let mask = if self.prefix_len == 0 {
            0
        } else {
            u32::MAX << (32 - self.prefix_len)
        };
        address & mask == self.address & mask
    }
}

impl FromStr for Cidr {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.contains('/') {
            return Err(DomainError::InvalidCidr(format!(
                "{s}: CIDR must include prefix (e.g., 10.0.0.0/8)"
            )));
        }
        let network: Ipv4Network = s
            .parse()
            .map_err(|e| DomainError::InvalidCidr(format!("{s}: {e}")))?;
        Cidr::new(u32::from(network.ip()), network.prefix())
    }
}

impl fmt::Display for Cidr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", Ipv4Addr::from(self.address), self.prefix_len)
    }
}

/// Parse a strict dotted-quad IPv4 address (four decimal octets, each ≤ 255).
pub fn parse_ipv4(s: &str) -> Result<u32, DomainError> {
    s.parse::<Ipv4Addr>()
        .map(u32::from)
        .map_err(|_| DomainError::InvalidIpAddress(s.to_string()))
}
