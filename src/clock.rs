//! Wall-clock source for "last updated" timestamps

use crate::constants::DEFAULT_TIME_ZONE;
use crate::error::AppError;
use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;

/// Provides the league's local time. Injected into the service so tests can
/// pin the timestamps written to division metadata.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Parses an IANA time zone name such as `America/New_York`
pub fn parse_time_zone(name: &str) -> Result<Tz, AppError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|e| AppError::config_error(format!("Unknown time zone '{name}': {e}")))
}

/// Current time in the league's time zone, daylight saving included
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    zone: Tz,
}

impl SystemClock {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    /// Builds a clock from an IANA time zone name
    pub fn from_name(name: &str) -> Result<Self, AppError> {
        parse_time_zone(name).map(Self::new)
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Wall-clock time in the league's zone at a given UTC instant
    pub fn local_time_at(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        instant.with_timezone(&self.zone).naive_local()
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::from_name(DEFAULT_TIME_ZONE).unwrap_or_else(|_| Self::new(chrono_tz::America::New_York))
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        self.local_time_at(Utc::now())
    }
}

/// Clock frozen at a given instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
