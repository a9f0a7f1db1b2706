//! Time source injected into contracts.
//!
//! Record creation is stamped with the clock's current time. Tests use
//! [`FixedClock`] for deterministic narratives.

use chrono::{DateTime, TimeZone, Utc};

/// Layout of timestamps embedded in record text, e.g. `2005-10-30 T 10:45UTC`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d T %H:%MUTC";

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// The current time rendered with [`TIMESTAMP_FORMAT`].
    fn timestamp(&self) -> String {
        self.now().format(TIMESTAMP_FORMAT).to_string()
    }
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Builds a clock from calendar fields, or `None` if they do not form a valid UTC time.
    pub fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
