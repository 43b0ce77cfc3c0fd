//! Sources of "today".
//!
//! Resolution itself is a pure function of the phrase and a reference date.
//! Only phrases that need the real current day ("now") and callers that pass
//! no reference date consult a [`Clock`].

use chrono::{Local, NaiveDate, Utc};
use chrono_tz::Tz;

use crate::error::{DateError, Result};

/// Supplies the current calendar day.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// The host's local calendar day.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// The calendar day in a fixed IANA timezone.
#[derive(Debug, Clone, Copy)]
pub struct ZonedClock(pub Tz);

impl ZonedClock {
    /// Build a clock from an IANA name such as `"Pacific/Auckland"`.
    pub fn parse(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(ZonedClock)
            .map_err(|_| DateError::InvalidTimezone(format!("'{name}'")))
    }
}

impl Clock for ZonedClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.0).date_naive()
    }
}

/// A clock stuck on one day, for tests and reproducible runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
