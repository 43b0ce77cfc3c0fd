//! Calendar windows and checked date arithmetic.
//!
//! Every function here works on proleptic Gregorian [`NaiveDate`]s and keeps
//! results inside years `1..=9999`. Anything that would leave that range is
//! reported as [`DateError::Overflow`] instead of panicking inside chrono.
//!
//! All ranges are closed: both `start` and `end` belong to the window.

use std::fmt;

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::{DateError, Result};

/// Earliest representable year.
pub const MIN_YEAR: i32 = 1;
/// Latest representable year.
pub const MAX_YEAR: i32 = 9999;

// ── Units ───────────────────────────────────────────────────────────────────

/// A calendar unit that can be counted or used as an enclosing window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Day,
    Weekend,
    Week,
    Month,
    Year,
    Decade,
    Century,
    Millennium,
}

impl Unit {
    pub const ALL: [Unit; 8] = [
        Unit::Day,
        Unit::Weekend,
        Unit::Week,
        Unit::Month,
        Unit::Year,
        Unit::Decade,
        Unit::Century,
        Unit::Millennium,
    ];

    /// Coarseness rank. Weekends and weeks share a rank.
    pub(crate) fn rank(self) -> u8 {
        match self {
            Unit::Day => 0,
            Unit::Weekend | Unit::Week => 1,
            Unit::Month => 2,
            Unit::Year => 3,
            Unit::Decade => 4,
            Unit::Century => 5,
            Unit::Millennium => 6,
        }
    }

    /// Whether a window of `self` can enclose a `unit`.
    pub fn can_enclose(self, unit: Unit) -> bool {
        self != Unit::Weekend && self.rank() > unit.rank()
    }

    /// Length in years, for the year-level units.
    pub fn span_years(self) -> Option<i32> {
        match self {
            Unit::Year => Some(1),
            Unit::Decade => Some(10),
            Unit::Century => Some(100),
            Unit::Millennium => Some(1000),
            Unit::Day | Unit::Weekend | Unit::Week | Unit::Month => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Unit::Day => "day",
            Unit::Weekend => "weekend",
            Unit::Week => "week",
            Unit::Month => "month",
            Unit::Year => "year",
            Unit::Decade => "decade",
            Unit::Century => "century",
            Unit::Millennium => "millennium",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── DateRange ───────────────────────────────────────────────────────────────

/// A closed `[start, end]` window of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of days in the window, both ends included.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.start, self.end)
    }
}

// ── Checked construction and arithmetic ─────────────────────────────────────

fn check_year(year: i32) -> Result<()> {
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(())
    } else {
        Err(DateError::Overflow(format!(
            "year {year} is outside {MIN_YEAR}..={MAX_YEAR}"
        )))
    }
}

/// Reject dates outside the representable calendar range.
pub(crate) fn ensure_in_range(date: NaiveDate) -> Result<NaiveDate> {
    check_year(date.year())?;
    Ok(date)
}

/// Build a date, rejecting years outside `1..=9999` and impossible days.
pub fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    check_year(year)?;
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        DateError::Overflow(format!("{year:04}-{month:02}-{day:02} is not a calendar date"))
    })
}

/// Add (or subtract, when negative) whole days.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate> {
    let overflow = || DateError::Overflow(format!("{date} {days:+} days"));
    let delta = Duration::try_days(days).ok_or_else(overflow)?;
    let shifted = date.checked_add_signed(delta).ok_or_else(overflow)?;
    ensure_in_range(shifted)
}

/// Add (or subtract) calendar months. The day is clamped to the target month.
pub fn add_months(date: NaiveDate, months: i64) -> Result<NaiveDate> {
    let overflow = || DateError::Overflow(format!("{date} {months:+} months"));
    let magnitude = u32::try_from(months.unsigned_abs()).map_err(|_| overflow())?;
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    }
    .ok_or_else(overflow)?;
    ensure_in_range(shifted)
}

/// Add (or subtract) calendar years. Feb 29 falls back to Feb 28.
pub fn add_years(date: NaiveDate, years: i64) -> Result<NaiveDate> {
    let months = years
        .checked_mul(12)
        .ok_or_else(|| DateError::Overflow(format!("{date} {years:+} years")))?;
    add_months(date, months)
}

// ── Leap years ──────────────────────────────────────────────────────────────

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 4 == 0 && year % 100 != 0)
}

/// Smallest leap year strictly greater than `year`.
pub fn next_leap_year(year: i32) -> Result<i32> {
    let overflow = || DateError::Overflow(format!("no leap year after {year}"));
    let mut candidate = year.checked_add(1).ok_or_else(overflow)?;
    while !is_leap_year(candidate) {
        candidate = candidate.checked_add(1).ok_or_else(overflow)?;
    }
    Ok(candidate)
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

// ── Range windows ───────────────────────────────────────────────────────────

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> Result<NaiveDate> {
    add_days(date, -i64::from(date.weekday().num_days_from_monday()))
}

/// Monday through Sunday of the ISO week containing `date`.
pub fn week_range(date: NaiveDate) -> Result<DateRange> {
    let start = week_start(date)?;
    Ok(DateRange {
        start,
        end: add_days(start, 6)?,
    })
}

/// The Saturday/Sunday pair enclosing or following `date`.
///
/// Monday to Friday map to the upcoming weekend, Saturday to itself and the
/// next day, Sunday to the previous day and itself.
pub fn weekend_range(date: NaiveDate) -> Result<DateRange> {
    let start = match date.weekday() {
        Weekday::Sat => date,
        Weekday::Sun => add_days(date, -1)?,
        other => add_days(date, 5 - i64::from(other.num_days_from_monday()))?,
    };
    Ok(DateRange {
        start,
        end: add_days(start, 1)?,
    })
}

pub fn month_range(date: NaiveDate) -> Result<DateRange> {
    let (year, month) = (date.year(), date.month());
    Ok(DateRange {
        start: ymd(year, month, 1)?,
        end: ymd(year, month, days_in_month(year, month))?,
    })
}

pub fn year_range(date: NaiveDate) -> Result<DateRange> {
    Ok(DateRange {
        start: ymd(date.year(), 1, 1)?,
        end: ymd(date.year(), 12, 31)?,
    })
}

/// Unclamped first year of the `span`-year block containing `year`.
pub(crate) fn block_base(year: i32, span: i32) -> i32 {
    year.div_euclid(span) * span
}

fn block_range(date: NaiveDate, span: i32) -> Result<DateRange> {
    let base = block_base(date.year(), span);
    Ok(DateRange {
        start: ymd(base.max(MIN_YEAR), 1, 1)?,
        end: ymd(base + span - 1, 12, 31)?,
    })
}

/// Ten-year window starting at `(year / 10) * 10`; the first decade starts in year 1.
pub fn decade_range(date: NaiveDate) -> Result<DateRange> {
    block_range(date, 10)
}

pub fn century_range(date: NaiveDate) -> Result<DateRange> {
    block_range(date, 100)
}

pub fn millennium_range(date: NaiveDate) -> Result<DateRange> {
    block_range(date, 1000)
}

/// The window of `unit` containing `date`.
pub fn range_of(unit: Unit, date: NaiveDate) -> Result<DateRange> {
    match unit {
        Unit::Day => Ok(DateRange {
            start: ensure_in_range(date)?,
            end: date,
        }),
        Unit::Weekend => weekend_range(date),
        Unit::Week => week_range(date),
        Unit::Month => month_range(date),
        Unit::Year => year_range(date),
        Unit::Decade => decade_range(date),
        Unit::Century => century_range(date),
        Unit::Millennium => millennium_range(date),
    }
}

/// First day of the window of `unit` containing `date`.
///
/// Unlike [`range_of`] this never computes the window end, so it succeeds for
/// windows that run past 9999-12-31.
pub fn start_of(unit: Unit, date: NaiveDate) -> Result<NaiveDate> {
    match unit {
        Unit::Day => ensure_in_range(date),
        Unit::Week => week_start(date),
        Unit::Weekend => weekend_range(date).map(|w| w.start),
        Unit::Month => ymd(date.year(), date.month(), 1),
        Unit::Year | Unit::Decade | Unit::Century | Unit::Millennium => {
            let span = unit.span_years().unwrap_or(1);
            ymd(block_base(date.year(), span).max(MIN_YEAR), 1, 1)
        }
    }
}

/// First day of the window of `unit` that follows the one containing `date`.
pub fn next_window_start(unit: Unit, date: NaiveDate) -> Result<NaiveDate> {
    match unit {
        Unit::Weekend => add_days(weekend_range(date)?.start, 7),
        _ => add_days(range_of(unit, date)?.end, 1),
    }
}

/// First day of the window of `unit` that precedes the one containing `date`.
pub fn previous_window_start(unit: Unit, date: NaiveDate) -> Result<NaiveDate> {
    match unit {
        Unit::Weekend => add_days(weekend_range(date)?.start, -7),
        _ => start_of(unit, add_days(start_of(unit, date)?, -1)?),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
