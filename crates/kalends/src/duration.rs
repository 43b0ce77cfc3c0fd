//! Duration extraction from normalized tokens.
//!
//! Understands `<integer> <unit>` pairs ("22 weeks", "1 hour 3 minutes") and
//! bare units ("day after tomorrow" reads as one day). Calendar units are kept
//! as months so that "1 year" after Feb 29 lands on Feb 28 rather than drifting
//! by a day.

use chrono::NaiveDate;
use serde::Serialize;

use crate::calendar::{add_days, add_months};
use crate::error::{DateError, Result};
use crate::normalize::tokenize;

/// A calendar-aware length of time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Span {
    pub months: i64,
    pub days: i64,
    pub seconds: i64,
}

impl Span {
    fn checked_add(self, other: Span) -> Option<Span> {
        Some(Span {
            months: self.months.checked_add(other.months)?,
            days: self.days.checked_add(other.days)?,
            seconds: self.seconds.checked_add(other.seconds)?,
        })
    }

    fn checked_scale(self, n: i64) -> Option<Span> {
        Some(Span {
            months: self.months.checked_mul(n)?,
            days: self.days.checked_mul(n)?,
            seconds: self.seconds.checked_mul(n)?,
        })
    }

    /// Shift `date` by this span, forwards when `forward` is true.
    ///
    /// Months are applied first (clamping the day of month), then days, then
    /// the whole days contained in `seconds`, truncated toward zero.
    pub fn apply(&self, date: NaiveDate, forward: bool) -> Result<NaiveDate> {
        let sign = if forward { 1 } else { -1 };
        let shifted = add_months(date, sign * self.months)?;
        let days = self
            .days
            .checked_add(self.seconds / 86_400)
            .ok_or_else(|| DateError::Overflow(format!("{date} shifted by {self:?}")))?;
        add_days(shifted, sign * days)
    }
}

/// The span of one `word` if it names a duration unit.
pub fn unit_span(word: &str) -> Option<Span> {
    let (months, days, seconds) = match word {
        "second" | "seconds" | "sec" | "secs" => (0, 0, 1),
        "minute" | "minutes" | "min" | "mins" => (0, 0, 60),
        "hour" | "hours" | "hr" | "hrs" => (0, 0, 3_600),
        "day" | "days" => (0, 1, 0),
        "week" | "weeks" => (0, 7, 0),
        "fortnight" | "fortnights" => (0, 14, 0),
        "month" | "months" => (1, 0, 0),
        "year" | "years" => (12, 0, 0),
        "decade" | "decades" => (120, 0, 0),
        "century" | "centuries" => (1_200, 0, 0),
        "millennium" | "millennia" | "millenniums" => (12_000, 0, 0),
        _ => return None,
    };
    Some(Span {
        months,
        days,
        seconds,
    })
}

/// The count in front of a unit. Digit strings too long for `i64` are an
/// overflow rather than "no count".
fn parse_count(word: &str) -> Result<Option<i64>> {
    if !word.is_empty() && word.bytes().all(|b| b.is_ascii_digit()) {
        return word
            .parse()
            .map(Some)
            .map_err(|_| DateError::Overflow(format!("count {word} is too large")));
    }
    Ok(word.parse().ok())
}

/// Extract a duration from a token slice.
///
/// Returns the summed span and the tokens that were not part of it, or `None`
/// when the slice names no duration unit at all.
pub fn extract_duration_tokens(tokens: &[String]) -> Result<Option<(Span, Vec<String>)>> {
    let overflow = || DateError::Overflow(format!("duration '{}'", tokens.join(" ")));
    let mut total = Span::default();
    let mut remainder = Vec::new();
    let mut found = false;
    let mut i = 0;

    while i < tokens.len() {
        let unit = tokens.get(i + 1).and_then(|t| unit_span(t));
        let count = match unit {
            Some(_) => parse_count(&tokens[i])?,
            None => None,
        };
        match (count, unit) {
            (Some(n), Some(span)) => {
                let scaled = span.checked_scale(n).ok_or_else(overflow)?;
                total = total.checked_add(scaled).ok_or_else(overflow)?;
                found = true;
                i += 2;
            }
            _ => {
                if let Some(span) = unit_span(&tokens[i]) {
                    total = total.checked_add(span).ok_or_else(overflow)?;
                    found = true;
                } else {
                    remainder.push(tokens[i].clone());
                }
                i += 1;
            }
        }
    }

    Ok(found.then_some((total, remainder)))
}

/// Extract a duration from free text, returning the unparsed remainder.
///
/// # Examples
///
/// ```
/// use kalends::extract_duration;
///
/// let (span, rest) = extract_duration("twenty two weeks ago").unwrap().unwrap();
/// assert_eq!(span.days, 154);
/// assert_eq!(rest, "ago");
/// ```
pub fn extract_duration(text: &str) -> Result<Option<(Span, String)>> {
    let tokens = tokenize(text);
    Ok(extract_duration_tokens(&tokens)?.map(|(span, rest)| (span, rest.join(" "))))
}
