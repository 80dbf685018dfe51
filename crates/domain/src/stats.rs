use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use std::ops::{Add, AddAssign};

pub const SECONDS_PER_HOUR: i64 = 3600;
pub const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Start of the UTC hour containing `timestamp` (seconds since the epoch).
///
/// The few timestamps whose hour start lies below `i64::MIN` map to the next
/// representable hour boundary.
#[inline]
pub fn hour_start(timestamp: i64) -> i64 {
    let offset = timestamp.rem_euclid(SECONDS_PER_HOUR);
    timestamp
        .checked_sub(offset)
        .unwrap_or(timestamp + (SECONDS_PER_HOUR - offset))
}

/// `[start, end)` of a UTC calendar day, in seconds since the epoch.
pub fn day_bounds(date: NaiveDate) -> (i64, i64) {
    let start = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    (start, start + SECONDS_PER_DAY)
}

/// Counter bucket identity: one customer within one hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BucketKey {
    pub hour: i64,
    pub customer_id: i64,
}

impl BucketKey {
    pub fn new(timestamp: i64, customer_id: i64) -> Self {
        Self {
            hour: hour_start(timestamp),
            customer_id,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Counts {
    pub accepted: u64,
    pub rejected: u64,
}

impl Counts {
    pub fn new(accepted: u64, rejected: u64) -> Self {
        Self { accepted, rejected }
    }

    pub fn total(&self) -> u64 {
        self.accepted + self.rejected
    }

    pub fn is_zero(&self) -> bool {
        self.accepted == 0 && self.rejected == 0
    }
}

impl Add for Counts {
    type Output = Counts;

    fn add(self, rhs: Counts) -> Counts {
        Counts {
            accepted: self.accepted + rhs.accepted,
            rejected: self.rejected + rhs.rejected,
        }
    }
}

impl AddAssign for Counts {
    fn add_assign(&mut self, rhs: Counts) {
        *self = *self + rhs;
    }
}

/// Accepted/rejected totals of one (hour, customer) bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlyCount {
    pub customer_id: i64,
    /// Hour-aligned Unix timestamp.
    pub hour: i64,
    pub counts: Counts,
}

impl HourlyCount {
    pub fn new(key: BucketKey, counts: Counts) -> Self {
        Self {
            customer_id: key.customer_id,
            hour: key.hour,
            counts,
        }
    }

    pub fn key(&self) -> BucketKey {
        BucketKey {
            hour: self.hour,
            customer_id: self.customer_id,
        }
    }

    pub fn hour_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.hour, 0)
    }
}

/// Per-hour breakdown for one customer and one day, hours ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsReport {
    pub customer_id: i64,
    pub total: Counts,
    pub hourly: Vec<HourlyCount>,
}

impl StatsReport {
    pub fn new(customer_id: i64) -> Self {
        Self {
            customer_id,
            ..Self::default()
        }
    }

    /// Add `counts` to `hour`, merging with an existing entry for that hour.
    pub fn add(&mut self, hour: i64, counts: Counts) {
        match self.hourly.binary_search_by_key(&hour, |h| h.hour) {
            Ok(i) => self.hourly[i].counts += counts,
            Err(i) => self.hourly.insert(
                i,
                HourlyCount {
                    customer_id: self.customer_id,
                    hour,
                    counts,
                },
            ),
        }
        self.total += counts;
    }
}
