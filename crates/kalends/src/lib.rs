//! # kalends
//!
//! Natural-language date expressions resolved against a reference date.
//!
//! Phrases such as "tomorrow", "twenty two weeks ago", "this spring" or
//! "the last day of the 9th decade of the 5th millennium" are turned into a
//! single proleptic Gregorian calendar date. Resolution is deterministic: the
//! output depends only on the phrase, the reference date and the options,
//! except for "now", which asks a [`Clock`].
//!
//! ## Modules
//!
//! - [`calendar`] — Unit windows (week, weekend, month … millennium), leap years, checked arithmetic
//! - [`season`] — Meteorological seasons for either hemisphere
//! - [`ordinal`] — "Nth unit of the enclosing window" via [`Resolution`]
//! - [`normalize`] — Phrase tokenizer
//! - [`numbers`] — Spelled-out numbers and ordinals to digits
//! - [`duration`] — Duration extraction ("1 hour 3 minutes", "22 weeks")
//! - [`resolver`] — Phrase classification and resolution
//! - [`clock`] — Sources of the current day
//! - [`error`] — Error types

pub mod calendar;
pub mod clock;
pub mod duration;
pub mod error;
pub mod normalize;
pub mod numbers;
pub mod ordinal;
pub mod resolver;
pub mod season;

pub use calendar::{
    century_range, days_in_month, decade_range, is_leap_year, millennium_range, month_range,
    next_leap_year, range_of, week_range, weekend_range, year_range, DateRange, Unit,
};
pub use clock::{Clock, FixedClock, SystemClock, ZonedClock};
pub use duration::{extract_duration, Span};
pub use error::DateError;
pub use normalize::tokenize;
pub use ordinal::{get_ordinal, Resolution};
pub use resolver::{extract_date, extract_date_with, ResolveOptions};
pub use season::{
    date_to_season, last_season_date, next_season_date, season_range, season_to_date, Hemisphere,
    Season,
};
