//! Tollgate Domain Layer
pub mod cidr;
pub mod config;
pub mod customer;
pub mod decision;
pub mod errors;
pub mod event;
pub mod pattern_matcher;
pub mod prefix_set;
pub mod stats;

pub use cidr::{parse_ipv4, Cidr};
pub use config::{CliOverrides, Config, ConfigError};
pub use customer::{Customer, CustomerStatus};
pub use decision::{AdmissionDecision, RejectReason};
pub use errors::DomainError;
pub use event::{IngestEvent, ValidEvent, ValidationError};
pub use pattern_matcher::{Match, Matches, PatternMatcher};
pub use prefix_set::PrefixSet;
pub use stats::{BucketKey, Counts, HourlyCount, StatsReport};
