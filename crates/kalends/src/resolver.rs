//! Natural-language date expressions to calendar dates.
//!
//! A phrase is tokenized, classified by its marker words into one shape and
//! handed to that shape's handler:
//!
//! | Markers                  | Shape    | Result                                  |
//! |--------------------------|----------|-----------------------------------------|
//! | `ago`                    | past     | reference − duration                    |
//! | `from`, `after`, `later` | after    | anchor + duration, or next whole unit   |
//! | `before`                 | before   | anchor − duration, or previous unit     |
//! | `plus`, `add`            | sum      | lhs + duration                          |
//! | `minus`, `subtract`      | subtract | lhs − duration                          |
//! | `of`                     | nesting  | Nth unit of the window named by the tail |
//!
//! When several marker groups occur, the last one in the phrase decides the
//! shape and its first occurrence is the split point. Phrases without markers
//! are folded token by token into an [`Interpretation`]. Nested parts (the
//! tail of "of", the anchor of "after") are resolved recursively on the token
//! slice.
//!
//! An unrecognised phrase is `Ok(None)`; errors are reserved for dates that
//! cannot be represented and shapes that demand a missing duration.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::calendar::{
    add_days, days_in_month, ensure_in_range, next_window_start, previous_window_start, start_of,
    week_start, weekend_range, ymd, Unit,
};
use crate::clock::{Clock, SystemClock};
use crate::duration::extract_duration_tokens;
use crate::error::{DateError, Result};
use crate::normalize::tokenize;
use crate::ordinal::{get_ordinal, Resolution};
use crate::season::{
    date_to_season, last_season_date, next_season_date, season_range, season_to_date, Hemisphere,
    Season,
};

// ── Options ─────────────────────────────────────────────────────────────────

/// Caller-side settings for [`extract_date_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveOptions {
    /// Granularity of "after X" / "before X" when no duration is given.
    pub resolution: Resolution,
    /// Which hemisphere season names refer to, unless the phrase overrides it.
    pub hemisphere: Hemisphere,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            resolution: Resolution::DAY,
            hemisphere: Hemisphere::North,
        }
    }
}

// ── Public API ──────────────────────────────────────────────────────────────

/// Resolve `phrase` relative to `reference`.
///
/// "now" reads the host clock; everything else depends only on the inputs.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use kalends::{extract_date, Hemisphere, Resolution};
///
/// let reference = NaiveDate::from_ymd_opt(2117, 2, 3).unwrap();
/// let date = extract_date(
///     "3rd day of the 5th month of the 10 century",
///     reference,
///     Resolution::DAY,
///     Hemisphere::North,
/// )
/// .unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(900, 5, 3));
/// ```
pub fn extract_date(
    phrase: &str,
    reference: NaiveDate,
    resolution: Resolution,
    hemisphere: Hemisphere,
) -> Result<Option<NaiveDate>> {
    let options = ResolveOptions {
        resolution,
        hemisphere,
    };
    extract_date_with(phrase, Some(reference), &options, &SystemClock)
}

/// Resolve `phrase` with an explicit clock.
///
/// Without a `reference` the clock's current day is used.
pub fn extract_date_with(
    phrase: &str,
    reference: Option<NaiveDate>,
    options: &ResolveOptions,
    clock: &dyn Clock,
) -> Result<Option<NaiveDate>> {
    let reference = ensure_in_range(reference.unwrap_or_else(|| clock.today()))?;
    let tokens = tokenize(phrase);
    debug!(phrase, ?tokens, %reference, resolution = %options.resolution, "resolving phrase");
    Resolver {
        reference,
        options: *options,
        clock,
    }
    .resolve(&tokens)
}

// ── Classification ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape {
    Past,
    After,
    Before,
    Sum,
    Subtract,
    Of,
}

fn marker(word: &str) -> Option<Shape> {
    match word {
        "ago" => Some(Shape::Past),
        "from" | "after" | "later" => Some(Shape::After),
        "before" => Some(Shape::Before),
        "plus" | "add" | "+" => Some(Shape::Sum),
        "minus" | "subtract" | "-" => Some(Shape::Subtract),
        "of" => Some(Shape::Of),
        _ => None,
    }
}

/// The shape of the last marker group and the index of its first marker.
fn classify(tokens: &[String]) -> Option<(Shape, usize)> {
    let shape = tokens.iter().rev().find_map(|t| marker(t))?;
    let split = tokens.iter().position(|t| marker(t) == Some(shape))?;
    Some((shape, split))
}

/// "southern hemisphere" anywhere in the phrase; the pair is removed.
fn hemisphere_override(tokens: &[String]) -> Option<(Hemisphere, Vec<String>)> {
    let at = tokens.iter().position(|t| t == "hemisphere")?;
    let hemisphere = match tokens.get(at.checked_sub(1)?)?.as_str() {
        "north" | "northern" => Hemisphere::North,
        "south" | "southern" => Hemisphere::South,
        _ => return None,
    };
    let rest = tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| *i + 1 != at && *i != at)
        .map(|(_, t)| t.clone())
        .collect();
    Some((hemisphere, rest))
}

// ── Vocabulary ──────────────────────────────────────────────────────────────

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s {
        "monday" | "mon" => Some(Weekday::Mon),
        "tuesday" | "tue" | "tues" => Some(Weekday::Tue),
        "wednesday" | "wed" => Some(Weekday::Wed),
        "thursday" | "thu" | "thurs" => Some(Weekday::Thu),
        "friday" | "fri" => Some(Weekday::Fri),
        "saturday" | "sat" => Some(Weekday::Sat),
        "sunday" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Parse a month name to number (1-12).
fn parse_month(s: &str) -> Option<u32> {
    match s {
        "january" | "jan" => Some(1),
        "february" | "feb" => Some(2),
        "march" | "mar" => Some(3),
        "april" | "apr" => Some(4),
        "may" => Some(5),
        "june" | "jun" => Some(6),
        "july" | "jul" => Some(7),
        "august" | "aug" => Some(8),
        "september" | "sep" | "sept" => Some(9),
        "october" | "oct" => Some(10),
        "november" | "nov" => Some(11),
        "december" | "dec" => Some(12),
        _ => None,
    }
}

fn parse_unit(s: &str) -> Option<Unit> {
    match s {
        "day" => Some(Unit::Day),
        "weekend" => Some(Unit::Weekend),
        "week" => Some(Unit::Week),
        "month" => Some(Unit::Month),
        "year" => Some(Unit::Year),
        "decade" => Some(Unit::Decade),
        "century" => Some(Unit::Century),
        "millennium" | "millennia" => Some(Unit::Millennium),
        _ => None,
    }
}

/// A whole non-negative number written in digits.
fn parse_integer(s: &str) -> Option<i64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() != 4 {
        return None;
    }
    parse_integer(s).and_then(|y| i32::try_from(y).ok())
}

fn parse_day_of_month(s: &str) -> Option<u32> {
    if s.len() > 2 {
        return None;
    }
    parse_integer(s)
        .and_then(|d| u32::try_from(d).ok())
        .filter(|d| (1..=31).contains(d))
}

/// "3" or "last" at the head of a nesting phrase.
fn parse_ordinal(s: &str) -> Option<i64> {
    match s {
        "last" => Some(-1),
        _ => parse_integer(s),
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Resolution used for "N {unit}" inside the reference's natural window.
fn default_resolution(unit: Unit) -> Resolution {
    match unit {
        Unit::Day => Resolution::DAY_OF_MONTH,
        Unit::Week => Resolution::WEEK_OF_MONTH,
        Unit::Weekend => Resolution::WEEKEND_OF_MONTH,
        Unit::Month => Resolution::MONTH_OF_YEAR,
        other => Resolution::of_unit(other),
    }
}

/// The window unit a nested anchor phrase names.
fn enclosing_unit(tokens: &[String]) -> Option<Unit> {
    tokens.iter().find_map(|t| {
        let t = t.as_str();
        if let Some(unit) = parse_unit(t) {
            Some(unit)
        } else if parse_month(t).is_some() {
            Some(Unit::Month)
        } else if parse_weekday(t).is_some()
            || parse_iso_date(t).is_some()
            || matches!(t, "today" | "tomorrow" | "yesterday" | "now")
        {
            Some(Unit::Day)
        } else {
            parse_year(t).map(|_| Unit::Year)
        }
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    This,
    Next,
    Last,
}

impl Modifier {
    fn parse(s: &str) -> Option<Self> {
        match s {
            "this" | "current" | "present" => Some(Modifier::This),
            "next" | "upcoming" | "coming" | "following" => Some(Modifier::Next),
            "last" | "past" | "previous" => Some(Modifier::Last),
            _ => None,
        }
    }
}

// ── Literal walk state ──────────────────────────────────────────────────────

/// What the tokens read so far say about the date.
#[derive(Debug, Clone, Copy)]
struct Interpretation {
    date: NaiveDate,
    found: bool,
    hemisphere: Hemisphere,
}

impl Interpretation {
    fn with_date(self, date: NaiveDate) -> Self {
        Self {
            date,
            found: true,
            ..self
        }
    }
}

/// The token under the cursor and its neighbours.
#[derive(Debug, Clone, Copy)]
struct Window<'a> {
    tokens: &'a [String],
    index: usize,
}

impl<'a> Window<'a> {
    fn current(&self) -> &'a str {
        self.tokens[self.index].as_str()
    }

    fn prev(&self, n: usize) -> Option<&'a str> {
        let i = self.index.checked_sub(n)?;
        self.tokens.get(i).map(String::as_str)
    }

    fn next(&self, n: usize) -> Option<&'a str> {
        self.tokens.get(self.index + n).map(String::as_str)
    }

    fn modifier(&self) -> Option<Modifier> {
        self.prev(1).and_then(Modifier::parse)
    }
}

/// New state plus the number of following tokens the handler consumed.
type Step = (Interpretation, usize);

// ── Resolver ────────────────────────────────────────────────────────────────

#[derive(Clone, Copy)]
struct Resolver<'a> {
    reference: NaiveDate,
    options: ResolveOptions,
    clock: &'a dyn Clock,
}

impl Resolver<'_> {
    fn resolve(&self, tokens: &[String]) -> Result<Option<NaiveDate>> {
        if tokens.is_empty() {
            return Ok(None);
        }
        if let Some((hemisphere, rest)) = hemisphere_override(tokens) {
            debug!(%hemisphere, "hemisphere override");
            let resolver = Resolver {
                options: ResolveOptions {
                    hemisphere,
                    ..self.options
                },
                ..*self
            };
            return resolver.resolve(&rest);
        }

        let Some((shape, split)) = classify(tokens) else {
            return self.literal(tokens);
        };
        debug!(?shape, split, ?tokens, "classified phrase");
        let (head, tail) = (&tokens[..split], &tokens[split + 1..]);
        match shape {
            Shape::Past => self.past(head),
            Shape::After => self.relative(head, tail, true),
            Shape::Before => self.relative(head, tail, false),
            Shape::Sum => self.shift(head, tail, true),
            Shape::Subtract => self.shift(head, tail, false),
            Shape::Of => self.nested(head, tail),
        }
    }

    fn past(&self, head: &[String]) -> Result<Option<NaiveDate>> {
        let (span, _) = extract_duration_tokens(head)?
            .ok_or_else(|| DateError::UnparseableDuration(head.join(" ")))?;
        span.apply(self.reference, false).map(Some)
    }

    fn relative(&self, head: &[String], tail: &[String], forward: bool) -> Result<Option<NaiveDate>> {
        let anchor = if tail.is_empty() {
            self.reference
        } else {
            match self.resolve(tail)? {
                Some(anchor) => anchor,
                None => return Ok(None),
            }
        };

        if let Some((span, _)) = extract_duration_tokens(head)? {
            return span.apply(anchor, forward).map(Some);
        }
        if !head.is_empty() {
            return Err(DateError::UnparseableDuration(head.join(" ")));
        }

        let unit = self.options.resolution.unit();
        let date = match (unit, forward) {
            (Unit::Weekend, true) => {
                let weekend = weekend_range(anchor)?;
                if anchor < weekend.start {
                    weekend.start
                } else {
                    next_window_start(unit, anchor)?
                }
            }
            (_, true) => next_window_start(unit, anchor)?,
            (_, false) => previous_window_start(unit, anchor)?,
        };
        Ok(Some(date))
    }

    fn shift(&self, lhs: &[String], rhs: &[String], forward: bool) -> Result<Option<NaiveDate>> {
        let (span, _) = extract_duration_tokens(rhs)?
            .ok_or_else(|| DateError::UnparseableDuration(rhs.join(" ")))?;
        let base = self.resolve(lhs)?.unwrap_or(self.reference);
        span.apply(base, forward).map(Some)
    }

    fn nested(&self, head: &[String], tail: &[String]) -> Result<Option<NaiveDate>> {
        let parsed = match head {
            [n] => parse_ordinal(n).map(|n| (n, Unit::Day)),
            [n, unit] => parse_ordinal(n).zip(parse_unit(unit)),
            _ => None,
        };
        let Some((ordinal, unit)) = parsed else {
            return Ok(None);
        };
        let Some(within) = enclosing_unit(tail) else {
            return Ok(None);
        };
        let Ok(resolution) = Resolution::new(unit, Some(within)) else {
            debug!(%unit, %within, "no resolution for nested units");
            return Ok(None);
        };
        let anchor = match tail {
            // "of the month" is the reference's own month
            [word] if parse_unit(word).is_some() => self.reference,
            _ => match self.resolve(tail)? {
                Some(anchor) => anchor,
                None => return Ok(None),
            },
        };
        debug!(ordinal, %resolution, %anchor, "nested ordinal");
        get_ordinal(ordinal, anchor, resolution).map(Some)
    }

    fn literal(&self, tokens: &[String]) -> Result<Option<NaiveDate>> {
        if let [first, rest @ ..] = tokens {
            if first == "in" {
                if let Some((span, _)) = extract_duration_tokens(rest)? {
                    return span.apply(self.reference, true).map(Some);
                }
            }
        }

        let mut state = Interpretation {
            date: self.reference,
            found: false,
            hemisphere: self.options.hemisphere,
        };
        let mut index = 0;
        while index < tokens.len() {
            let (next, consumed) = self.interpret(state, Window { tokens, index })?;
            state = next;
            index += 1 + consumed;
        }
        Ok(state.found.then_some(state.date))
    }

    fn interpret(&self, state: Interpretation, window: Window<'_>) -> Result<Step> {
        let word = window.current();
        let step = match word {
            "now" => (state.with_date(self.clock.today()), 0),
            "today" | "tonight" => (state.with_date(self.reference), 0),
            "yesterday" => (state.with_date(add_days(self.reference, -1)?), 0),
            "tomorrow" => (state.with_date(add_days(self.reference, 1)?), 0),
            "season" => (state.with_date(self.season(state, window, None)?), 0),
            _ => {
                if let Some(weekday) = parse_weekday(word) {
                    (state.with_date(self.weekday(state, window, weekday)?), 0)
                } else if let Some(month) = parse_month(word) {
                    self.month(state, window, month)?
                } else if let Some(season) = Season::from_word(word) {
                    (state.with_date(self.season(state, window, Some(season))?), 0)
                } else if let Some(unit) = parse_unit(word) {
                    self.unit(state, window, unit)?
                } else if let Some(year) = parse_year(word) {
                    self.bare_year(state, window, year)?
                } else if let Some(date) = parse_iso_date(word) {
                    (state.with_date(ensure_in_range(date)?), 0)
                } else {
                    (state, 0)
                }
            }
        };
        if (step.0.date, step.0.found) != (state.date, state.found) {
            trace!(token = word, date = %step.0.date, "literal match");
        }
        Ok(step)
    }

    fn weekday(&self, state: Interpretation, window: Window<'_>, target: Weekday) -> Result<NaiveDate> {
        let from = state.date;
        let current = i64::from(from.weekday().num_days_from_monday());
        let target = i64::from(target.num_days_from_monday());
        match window.modifier() {
            Some(Modifier::Last) => {
                let back = (current - target).rem_euclid(7);
                add_days(from, if back == 0 { -7 } else { -back })
            }
            Some(Modifier::This) => add_days(week_start(from)?, target),
            Some(Modifier::Next) | None => {
                let ahead = (target - current).rem_euclid(7);
                add_days(from, if ahead == 0 { 7 } else { ahead })
            }
        }
    }

    fn month(&self, state: Interpretation, window: Window<'_>, month: u32) -> Result<Step> {
        let mut consumed = 0;
        let day = match window.next(1).and_then(parse_day_of_month) {
            Some(day) => {
                consumed = 1;
                Some(day)
            }
            None => window.prev(1).and_then(parse_day_of_month),
        };
        let year = match window.next(consumed + 1).and_then(parse_year) {
            Some(year) => {
                consumed += 1;
                Some(year)
            }
            None => window.prev(1).and_then(parse_year),
        };

        let current = state.date;
        let year = match (year, window.modifier()) {
            (Some(year), _) => year,
            (None, Some(Modifier::Last)) if month >= current.month() => current.year() - 1,
            (None, Some(Modifier::Next)) if month <= current.month() => current.year() + 1,
            (None, _) => current.year(),
        };
        // "31 february" clamps to the end of the month
        let day = day.unwrap_or(1).min(days_in_month(year, month));
        Ok((state.with_date(ymd(year, month, day)?), consumed))
    }

    fn season(&self, state: Interpretation, window: Window<'_>, season: Option<Season>) -> Result<NaiveDate> {
        let (date, hemisphere) = (state.date, state.hemisphere);
        match (season, window.modifier()) {
            (None, Some(Modifier::Next)) => add_days(season_range(date, hemisphere)?.end, 1),
            (None, Some(Modifier::Last)) => {
                let previous = add_days(season_range(date, hemisphere)?.start, -1)?;
                Ok(season_range(previous, hemisphere)?.start)
            }
            (None, _) => Ok(season_range(date, hemisphere)?.start),
            (Some(season), Some(Modifier::Next)) => {
                next_season_date(season, add_days(date, 1)?, hemisphere)
            }
            (Some(season), Some(Modifier::Last)) => last_season_date(season, date, hemisphere),
            (Some(season), _) if date_to_season(date, hemisphere) == season => {
                Ok(season_range(date, hemisphere)?.start)
            }
            (Some(season), _) => season_to_date(season, date.year(), hemisphere),
        }
    }

    fn unit(&self, state: Interpretation, window: Window<'_>, unit: Unit) -> Result<Step> {
        let date = state.date;

        // "year is 1992", "day was 5"
        if matches!(window.next(1), Some("is" | "was")) {
            if let Some(n) = window.next(2).and_then(parse_integer) {
                let resolved = get_ordinal(n, date, default_resolution(unit))?;
                return Ok((state.with_date(resolved), 2));
            }
        }
        if let Some(n) = window.prev(1).and_then(parse_integer) {
            let resolved = get_ordinal(n, date, default_resolution(unit))?;
            return Ok((state.with_date(resolved), 0));
        }

        let resolved = match (window.modifier(), unit) {
            (Some(Modifier::This), _) => start_of(unit, date)?,
            (Some(Modifier::Next), Unit::Weekend) => weekend_range(add_days(date, 7)?)?.start,
            (Some(Modifier::Next), _) => next_window_start(unit, date)?,
            (Some(Modifier::Last), _) => previous_window_start(unit, date)?,
            (None, Unit::Weekend) => weekend_range(date)?.start,
            (None, _) => return Ok((state, 0)),
        };
        Ok((state.with_date(resolved), 0))
    }

    fn bare_year(&self, state: Interpretation, window: Window<'_>, year: i32) -> Result<Step> {
        // "1992 may" and "1992 year" belong to the month and unit handlers
        if window
            .next(1)
            .is_some_and(|w| parse_unit(w).is_some() || parse_month(w).is_some())
        {
            return Ok((state, 0));
        }
        Ok((state.with_date(ymd(year, 1, 1)?), 0))
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Wednesday, February 3, 2117
    fn anchor() -> NaiveDate {
        date(2117, 2, 3)
    }

    fn resolve_with(phrase: &str, reference: NaiveDate, resolution: Resolution) -> Result<Option<NaiveDate>> {
        let options = ResolveOptions {
            resolution,
            hemisphere: Hemisphere::North,
        };
        extract_date_with(phrase, Some(reference), &options, &FixedClock(date(2000, 1, 1)))
    }

    fn resolve(phrase: &str) -> Option<NaiveDate> {
        resolve_with(phrase, anchor(), Resolution::DAY).unwrap()
    }

    // ── classification tests ────────────────────────────────────────────

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_classify_last_group_wins() {
        assert_eq!(classify(&words("3 days from tomorrow")), Some((Shape::After, 2)));
        assert_eq!(classify(&words("1 day of 2 month of 3 year")), Some((Shape::Of, 2)));
        assert_eq!(classify(&words("2 days after 1 day of may")), Some((Shape::Of, 5)));
        assert_eq!(classify(&words("next friday")), None);
    }

    #[test]
    fn test_hemisphere_override_removes_pair() {
        let (h, rest) = hemisphere_override(&words("this spring in southern hemisphere")).unwrap();
        assert_eq!(h, Hemisphere::South);
        assert_eq!(rest, words("this spring in"));
        assert!(hemisphere_override(&words("western hemisphere")).is_none());
    }

    // ── anchored keyword tests ──────────────────────────────────────────

    #[test]
    fn test_today_tomorrow_yesterday() {
        assert_eq!(resolve("today"), Some(date(2117, 2, 3)));
        assert_eq!(resolve("tomorrow"), Some(date(2117, 2, 4)));
        assert_eq!(resolve("yesterday"), Some(date(2117, 2, 2)));
    }

    #[test]
    fn test_now_reads_clock() {
        assert_eq!(resolve("now"), Some(date(2000, 1, 1)));
    }

    #[test]
    fn test_missing_reference_uses_clock() {
        let clock = FixedClock(anchor());
        let got = extract_date_with("tomorrow", None, &ResolveOptions::default(), &clock).unwrap();
        assert_eq!(got, Some(date(2117, 2, 4)));
    }

    #[test]
    fn test_unrecognised_is_none() {
        assert_eq!(resolve("hello world"), None);
        assert_eq!(resolve(""), None);
        assert_eq!(resolve("week"), None);
    }

    // ── weekday tests ───────────────────────────────────────────────────

    #[test]
    fn test_weekday_forward() {
        assert_eq!(resolve("friday"), Some(date(2117, 2, 5)));
        assert_eq!(resolve("next fri"), Some(date(2117, 2, 5)));
        // same weekday is a full week away
        assert_eq!(resolve("wednesday"), Some(date(2117, 2, 10)));
    }

    #[test]
    fn test_weekday_backward() {
        assert_eq!(resolve("last friday"), Some(date(2117, 1, 29)));
        assert_eq!(resolve("past wednesday"), Some(date(2117, 1, 27)));
    }

    #[test]
    fn test_weekday_this_week() {
        assert_eq!(resolve("this monday"), Some(date(2117, 2, 1)));
        assert_eq!(resolve("this sunday"), Some(date(2117, 2, 7)));
    }

    // ── month name tests ────────────────────────────────────────────────

    #[test]
    fn test_month_names() {
        assert_eq!(resolve("march"), Some(date(2117, 3, 1)));
        assert_eq!(resolve("13 may 1992"), Some(date(1992, 5, 13)));
        assert_eq!(resolve("may 13 1992"), Some(date(1992, 5, 13)));
        assert_eq!(resolve("Feb 29, 2024"), Some(date(2024, 2, 29)));
        assert_eq!(resolve("december 25th"), Some(date(2117, 12, 25)));
    }

    #[test]
    fn test_month_last_and_next() {
        assert_eq!(resolve("last march"), Some(date(2116, 3, 1)));
        assert_eq!(resolve("last january"), Some(date(2117, 1, 1)));
        assert_eq!(resolve("next january"), Some(date(2118, 1, 1)));
        assert_eq!(resolve("next march"), Some(date(2117, 3, 1)));
    }

    #[test]
    fn test_impossible_day_clamps() {
        assert_eq!(resolve("31 february"), Some(date(2117, 2, 28)));
    }

    // ── season tests ────────────────────────────────────────────────────

    #[test]
    fn test_named_seasons() {
        assert_eq!(resolve("this spring"), Some(date(2117, 3, 1)));
        assert_eq!(resolve("this winter"), Some(date(2116, 12, 1)));
        assert_eq!(resolve("next winter"), Some(date(2117, 12, 1)));
        assert_eq!(resolve("last spring"), Some(date(2116, 3, 1)));
        assert_eq!(resolve("autumn"), Some(date(2117, 9, 1)));
    }

    #[test]
    fn test_relative_season() {
        assert_eq!(resolve("this season"), Some(date(2116, 12, 1)));
        assert_eq!(resolve("next season"), Some(date(2117, 3, 1)));
        assert_eq!(resolve("last season"), Some(date(2116, 9, 1)));
    }

    #[test]
    fn test_southern_hemisphere() {
        assert_eq!(
            resolve("this spring in the southern hemisphere"),
            Some(date(2117, 9, 1))
        );
        let options = ResolveOptions {
            resolution: Resolution::DAY,
            hemisphere: Hemisphere::South,
        };
        let got = extract_date_with("this summer", Some(anchor()), &options, &FixedClock(anchor()));
        assert_eq!(got.unwrap(), Some(date(2116, 12, 1)));
    }

    // ── unit keyword tests ──────────────────────────────────────────────

    #[test]
    fn test_weekend() {
        assert_eq!(resolve("this weekend"), Some(date(2117, 2, 6)));
        assert_eq!(resolve("weekend"), Some(date(2117, 2, 6)));
        assert_eq!(resolve("next weekend"), Some(date(2117, 2, 13)));
        assert_eq!(resolve("last weekend"), Some(date(2117, 1, 30)));
    }

    #[test]
    fn test_this_weekend_on_sunday() {
        let sunday = date(2117, 2, 7);
        let got = resolve_with("this weekend", sunday, Resolution::DAY).unwrap();
        assert_eq!(got, Some(date(2117, 2, 6)));
    }

    #[test]
    fn test_next_weekend_from_saturday() {
        let saturday = date(2117, 2, 6);
        let got = resolve_with("next weekend", saturday, Resolution::DAY).unwrap();
        assert_eq!(got, Some(date(2117, 2, 13)));
    }

    #[test]
    fn test_this_next_last_units() {
        assert_eq!(resolve("this month"), Some(date(2117, 2, 1)));
        assert_eq!(resolve("next week"), Some(date(2117, 2, 8)));
        assert_eq!(resolve("last year"), Some(date(2116, 1, 1)));
        assert_eq!(resolve("next decade"), Some(date(2120, 1, 1)));
        assert_eq!(resolve("previous century"), Some(date(2000, 1, 1)));
        assert_eq!(resolve("current millennium"), Some(date(2000, 1, 1)));
    }

    #[test]
    fn test_counted_units() {
        assert_eq!(resolve("3rd week"), Some(date(2117, 2, 15)));
        assert_eq!(resolve("10 century"), Some(date(900, 1, 1)));
        assert_eq!(resolve("5th month"), Some(date(2117, 5, 1)));
    }

    #[test]
    fn test_unit_is_number() {
        assert_eq!(resolve("the year is 1992"), Some(date(1992, 1, 1)));
        assert_eq!(resolve("the day was 5"), Some(date(2117, 2, 5)));
    }

    #[test]
    fn test_bare_year_and_iso() {
        assert_eq!(resolve("1992"), Some(date(1992, 1, 1)));
        assert_eq!(resolve("2117-12-25"), Some(date(2117, 12, 25)));
    }

    #[test]
    fn test_bare_year_after_copula() {
        assert_eq!(resolve("it is 1992"), Some(date(1992, 1, 1)));
        assert_eq!(resolve("it's 1992"), Some(date(1992, 1, 1)));
        assert_eq!(resolve("the date was 1992"), Some(date(1992, 1, 1)));
    }

    // ── duration shape tests ────────────────────────────────────────────

    #[test]
    fn test_past() {
        assert_eq!(resolve("twenty two weeks ago"), Some(date(2116, 9, 2)));
        assert_eq!(resolve("3 days ago"), Some(date(2117, 1, 31)));
        assert_eq!(resolve("a year ago"), Some(date(2116, 2, 3)));
        assert_eq!(resolve("two second ago"), Some(date(2117, 2, 3)));
    }

    #[test]
    fn test_past_without_duration_errors() {
        let err = resolve_with("long ago", anchor(), Resolution::DAY).unwrap_err();
        assert_eq!(err, DateError::UnparseableDuration("long".to_string()));
    }

    #[test]
    fn test_in_duration() {
        assert_eq!(resolve("in 3 days"), Some(date(2117, 2, 6)));
        assert_eq!(resolve("in a fortnight"), Some(date(2117, 2, 17)));
    }

    #[test]
    fn test_duration_from_anchor() {
        assert_eq!(resolve("10 days from tomorrow"), Some(date(2117, 2, 14)));
        assert_eq!(resolve("the day after tomorrow"), Some(date(2117, 2, 5)));
        assert_eq!(resolve("2 weeks before may"), Some(date(2117, 4, 17)));
        assert_eq!(resolve("3 days later"), Some(date(2117, 2, 6)));
    }

    #[test]
    fn test_unresolvable_anchor_is_none() {
        assert_eq!(resolve("3 days after christmas"), None);
    }

    #[test]
    fn test_sum_and_subtract() {
        assert_eq!(resolve("tomorrow plus 2 days"), Some(date(2117, 2, 6)));
        assert_eq!(resolve("+ 1 week"), Some(date(2117, 2, 10)));
        assert_eq!(resolve("tomorrow minus 1 month"), Some(date(2117, 1, 4)));
        let err = resolve_with("tomorrow plus banana", anchor(), Resolution::DAY).unwrap_err();
        assert!(matches!(err, DateError::UnparseableDuration(_)));
    }

    // ── whole-unit after/before tests ───────────────────────────────────

    #[test]
    fn test_after_year() {
        let got = resolve_with("after 1992", anchor(), Resolution::YEAR).unwrap();
        assert_eq!(got, Some(date(1993, 1, 1)));
    }

    #[test]
    fn test_after_week_starts_on_monday() {
        // 1992-01-01 is a Wednesday
        let got = resolve_with("after 1992", anchor(), Resolution::WEEK).unwrap();
        assert_eq!(got, Some(date(1992, 1, 6)));
    }

    #[test]
    fn test_before_month() {
        let got = resolve_with("before april 1992", anchor(), Resolution::MONTH).unwrap();
        assert_eq!(got, Some(date(1992, 3, 1)));
    }

    #[test]
    fn test_after_weekend() {
        let got = resolve_with("after tomorrow", anchor(), Resolution::WEEKEND).unwrap();
        assert_eq!(got, Some(date(2117, 2, 6)));
        let got = resolve_with("after saturday", anchor(), Resolution::WEEKEND).unwrap();
        assert_eq!(got, Some(date(2117, 2, 13)));
    }

    #[test]
    fn test_after_day_is_next_day() {
        assert_eq!(resolve("after tomorrow"), Some(date(2117, 2, 5)));
        assert_eq!(resolve("before tomorrow"), Some(date(2117, 2, 3)));
    }

    // ── nesting tests ───────────────────────────────────────────────────

    #[test]
    fn test_nth_day_of_window() {
        assert_eq!(resolve("first day of the 10th century"), Some(date(900, 1, 1)));
        assert_eq!(resolve("last day of this century"), Some(date(2199, 12, 31)));
        assert_eq!(resolve("the 3rd of may"), Some(date(2117, 5, 3)));
        assert_eq!(resolve("last day of february"), Some(date(2117, 2, 28)));
        assert_eq!(resolve("last day of next month"), Some(date(2117, 3, 31)));
    }

    #[test]
    fn test_nth_of_bare_unit_uses_reference_window() {
        assert_eq!(resolve("first of the month"), Some(date(2117, 2, 1)));
        assert_eq!(resolve("last day of the month"), Some(date(2117, 2, 28)));
        assert_eq!(resolve("last day of the year"), Some(date(2117, 12, 31)));
        assert_eq!(resolve("2nd month of the year"), Some(date(2117, 2, 1)));
    }

    #[test]
    fn test_chained_nesting() {
        assert_eq!(
            resolve("3rd day of the 5th month of the 10 century"),
            Some(date(900, 5, 3))
        );
        assert_eq!(
            resolve("last day of the 9th decade of the 5th millennium"),
            Some(date(4089, 12, 31))
        );
        assert_eq!(
            resolve("second day of the third month of the first year of the 9th millennium"),
            Some(date(8000, 3, 2))
        );
    }

    #[test]
    fn test_inverted_nesting_is_none() {
        assert_eq!(
            resolve("9th millennium, the second day of the third month of the first year"),
            None
        );
    }

    #[test]
    fn test_invalid_nesting_is_none() {
        assert_eq!(resolve("first month of next week"), None);
        assert_eq!(resolve("first day of nothing"), None);
    }

    #[test]
    fn test_first_week_of_month() {
        // March 2117 starts on a Monday
        assert_eq!(resolve("1st week of march"), Some(date(2117, 3, 1)));
    }

    // ── overflow tests ──────────────────────────────────────────────────

    #[test]
    fn test_overflow_surfaces() {
        let late = date(9999, 6, 1);
        let err = resolve_with("next year", late, Resolution::DAY).unwrap_err();
        assert!(matches!(err, DateError::Overflow(_)));
        let err = resolve_with("20 millennium", anchor(), Resolution::DAY).unwrap_err();
        assert!(matches!(err, DateError::Overflow(_)));
    }

    #[test]
    fn test_oversized_count_is_overflow() {
        for phrase in [
            "99999999999999999999 days ago",
            "99999999999999999999 days from tomorrow",
            "in 99999999999999999999 weeks",
        ] {
            let err = resolve_with(phrase, anchor(), Resolution::DAY).unwrap_err();
            assert!(matches!(err, DateError::Overflow(_)), "{phrase}: {err}");
        }
    }

    #[test]
    fn test_options_serde() {
        let json = r#"{"resolution":"WEEK_OF_YEAR","hemisphere":"south"}"#;
        let options: ResolveOptions = serde_json::from_str(json).unwrap();
        assert_eq!(options.resolution, Resolution::WEEK_OF_YEAR);
        assert_eq!(options.hemisphere, Hemisphere::South);
        let defaults: ResolveOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, ResolveOptions::default());
    }
}
