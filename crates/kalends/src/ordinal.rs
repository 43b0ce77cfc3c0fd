//! Ordinal-to-date resolution.
//!
//! A [`Resolution`] pairs the counted [`Unit`] with an optional enclosing
//! unit. `get_ordinal(3, r, Resolution::MONTH_OF_CENTURY)` is "the 3rd month
//! of the century containing `r`". Without an enclosing unit the ordinal is
//! counted from the calendar epoch, 0001-01-01.
//!
//! Every `X_OF_Y` combination follows the same shape: find `Y`'s window around
//! the reference date, then step `n - 1` units of `X` from the first `X` in
//! that window. Only the definition of "first" and "last" differs per unit.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::calendar::{
    add_days, add_months, block_base, range_of, start_of, week_start, ymd, Unit, MIN_YEAR,
};
use crate::error::{DateError, Result};

// ── Resolution ──────────────────────────────────────────────────────────────

/// The granularity an ordinal is counted in, optionally inside a larger window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Resolution {
    unit: Unit,
    within: Option<Unit>,
}

macro_rules! resolutions {
    (@within) => { None };
    (@within $within:ident) => { Some(Unit::$within) };
    ($($name:ident = $unit:ident $(of $within:ident)?;)*) => {
        impl Resolution {
            $(
                pub const $name: Resolution = Resolution {
                    unit: Unit::$unit,
                    within: resolutions!(@within $($within)?),
                };
            )*

            /// Every valid resolution, pure units first.
            pub const ALL: &'static [Resolution] = &[$(Resolution::$name),*];
        }
    };
}

resolutions! {
    DAY = Day;
    WEEKEND = Weekend;
    WEEK = Week;
    MONTH = Month;
    YEAR = Year;
    DECADE = Decade;
    CENTURY = Century;
    MILLENNIUM = Millennium;

    DAY_OF_WEEK = Day of Week;
    DAY_OF_MONTH = Day of Month;
    DAY_OF_YEAR = Day of Year;
    DAY_OF_DECADE = Day of Decade;
    DAY_OF_CENTURY = Day of Century;
    DAY_OF_MILLENNIUM = Day of Millennium;

    WEEKEND_OF_MONTH = Weekend of Month;
    WEEKEND_OF_YEAR = Weekend of Year;
    WEEKEND_OF_DECADE = Weekend of Decade;
    WEEKEND_OF_CENTURY = Weekend of Century;
    WEEKEND_OF_MILLENNIUM = Weekend of Millennium;

    WEEK_OF_MONTH = Week of Month;
    WEEK_OF_YEAR = Week of Year;
    WEEK_OF_DECADE = Week of Decade;
    WEEK_OF_CENTURY = Week of Century;
    WEEK_OF_MILLENNIUM = Week of Millennium;

    MONTH_OF_YEAR = Month of Year;
    MONTH_OF_DECADE = Month of Decade;
    MONTH_OF_CENTURY = Month of Century;
    MONTH_OF_MILLENNIUM = Month of Millennium;

    YEAR_OF_DECADE = Year of Decade;
    YEAR_OF_CENTURY = Year of Century;
    YEAR_OF_MILLENNIUM = Year of Millennium;

    DECADE_OF_CENTURY = Decade of Century;
    DECADE_OF_MILLENNIUM = Decade of Millennium;

    CENTURY_OF_MILLENNIUM = Century of Millennium;
}

impl Resolution {
    /// Build a resolution, rejecting enclosing units that cannot hold `unit`.
    pub fn new(unit: Unit, within: Option<Unit>) -> Result<Self> {
        match within {
            Some(w) if !w.can_enclose(unit) => Err(DateError::InvalidResolution(format!(
                "a {w} cannot enclose a {unit}"
            ))),
            _ => Ok(Self { unit, within }),
        }
    }

    /// A pure unit, counted from the calendar epoch.
    pub const fn of_unit(unit: Unit) -> Self {
        Self { unit, within: None }
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    pub fn within(&self) -> Option<Unit> {
        self.within
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit = self.unit.name().to_uppercase();
        match self.within {
            Some(w) => write!(f, "{unit}_OF_{}", w.name().to_uppercase()),
            None => f.write_str(&unit),
        }
    }
}

fn parse_unit(s: &str) -> Option<Unit> {
    Unit::ALL.into_iter().find(|u| u.name() == s)
}

impl FromStr for Resolution {
    type Err = DateError;

    /// Accepts `DAY_OF_MONTH`, `day-of-month` and `day of month`.
    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase().replace(['-', ' '], "_");
        let invalid = || DateError::InvalidResolution(format!("'{}'", s.trim()));
        match normalized.split_once("_of_") {
            Some((unit, within)) => {
                let unit = parse_unit(unit).ok_or_else(invalid)?;
                let within = parse_unit(within).ok_or_else(invalid)?;
                Resolution::new(unit, Some(within))
            }
            None => parse_unit(&normalized)
                .map(Resolution::of_unit)
                .ok_or_else(invalid),
        }
    }
}

impl TryFrom<String> for Resolution {
    type Error = DateError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Resolution> for String {
    fn from(resolution: Resolution) -> Self {
        resolution.to_string()
    }
}

// ── get_ordinal ─────────────────────────────────────────────────────────────

/// Resolve the `ordinal`-th unit of `resolution` relative to `reference`.
///
/// * `n >= 1` counts from the start of the enclosing window.
/// * `-1` is the last unit in the enclosing window.
/// * `0` on an `X_OF_Y` resolution is the last unit of the preceding window;
///   on year-level pure units it maps to year 1.
///
/// # Errors
///
/// [`DateError::Overflow`] when the result falls outside years 1..=9999 or
/// when "last" is asked of a pure unit; [`DateError::InvalidOrdinal`] for
/// negative ordinals other than -1.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use kalends::{get_ordinal, Resolution};
///
/// let reference = NaiveDate::from_ymd_opt(2117, 2, 3).unwrap();
/// let last = get_ordinal(-1, reference, Resolution::DAY_OF_CENTURY).unwrap();
/// assert_eq!(last, NaiveDate::from_ymd_opt(2199, 12, 31).unwrap());
/// ```
pub fn get_ordinal(ordinal: i64, reference: NaiveDate, resolution: Resolution) -> Result<NaiveDate> {
    if ordinal < -1 {
        return Err(DateError::InvalidOrdinal(format!(
            "{ordinal} for {resolution}: only -1 (last) may be negative"
        )));
    }
    match resolution.within {
        None => from_epoch(ordinal, resolution.unit),
        Some(within) if ordinal == 0 => {
            let window_start = start_of(within, reference)?;
            get_ordinal(-1, add_days(window_start, -1)?, resolution)
        }
        Some(within) if ordinal == -1 => last_in_window(resolution.unit, within, reference),
        Some(within) => nth_in_window(ordinal, resolution.unit, within, reference),
    }
}

/// Ordinals of pure units, counted from 0001-01-01 (a Monday).
fn from_epoch(ordinal: i64, unit: Unit) -> Result<NaiveDate> {
    if ordinal == -1 {
        return Err(DateError::Overflow(format!(
            "last {unit} of existence cannot be represented"
        )));
    }
    let epoch = ymd(MIN_YEAR, 1, 1)?;
    match unit.span_years() {
        Some(span) => {
            let year = match unit {
                Unit::Year => Some(ordinal),
                _ => (ordinal - 1).checked_mul(i64::from(span)),
            };
            let year = year.ok_or_else(|| DateError::Overflow(format!("{unit} {ordinal}")))?;
            ymd(year_number(year)?.max(MIN_YEAR), 1, 1)
        }
        None if ordinal == 0 => Err(DateError::Overflow(format!(
            "there is no {unit} before the calendar epoch"
        ))),
        None => step(unit, first_on_or_after(unit, epoch)?, ordinal - 1),
    }
}

fn nth_in_window(ordinal: i64, unit: Unit, within: Unit, reference: NaiveDate) -> Result<NaiveDate> {
    match unit.span_years() {
        Some(span) => {
            let span_years = within.span_years().unwrap_or(1);
            let base = block_base(reference.year(), span_years);
            let year = (ordinal - 1)
                .checked_mul(i64::from(span))
                .and_then(|offset| offset.checked_add(i64::from(base)))
                .ok_or_else(|| DateError::Overflow(format!("{unit} {ordinal} of {within}")))?;
            ymd(year_number(year)?.max(MIN_YEAR), 1, 1)
        }
        None => {
            let window_start = start_of(within, reference)?;
            step(unit, first_on_or_after(unit, window_start)?, ordinal - 1)
        }
    }
}

fn last_in_window(unit: Unit, within: Unit, reference: NaiveDate) -> Result<NaiveDate> {
    let window = range_of(within, reference)?;
    match unit {
        Unit::Week if within == Unit::Month => {
            week_start(ymd(window.start.year(), window.start.month(), 28)?)
        }
        Unit::Weekend => {
            let back = (i64::from(window.end.weekday().num_days_from_monday()) + 2) % 7;
            add_days(window.end, -back)
        }
        _ => start_of(unit, window.end),
    }
}

/// First occurrence of `unit` starting on or after `date`.
fn first_on_or_after(unit: Unit, date: NaiveDate) -> Result<NaiveDate> {
    let target = match unit {
        Unit::Week => Weekday::Mon,
        Unit::Weekend => Weekday::Sat,
        _ => return Ok(date),
    };
    let ahead = (7 + i64::from(target.num_days_from_monday())
        - i64::from(date.weekday().num_days_from_monday()))
        % 7;
    add_days(date, ahead)
}

fn step(unit: Unit, from: NaiveDate, count: i64) -> Result<NaiveDate> {
    let overflow = || DateError::Overflow(format!("{from} + {count} {unit}s"));
    match unit {
        Unit::Day => add_days(from, count),
        Unit::Week | Unit::Weekend => add_days(from, count.checked_mul(7).ok_or_else(overflow)?),
        Unit::Month => add_months(from, count),
        Unit::Year | Unit::Decade | Unit::Century | Unit::Millennium => {
            Err(DateError::InvalidOrdinal(format!("cannot step {unit}s by days")))
        }
    }
}

fn year_number(year: i64) -> Result<i32> {
    i32::try_from(year).map_err(|_| DateError::Overflow(format!("year {year}")))
}

// ── Tests ───────────────────────────────────────────────────────────────────
