//! Meteorological seasons per hemisphere.
//!
//! Seasons are three whole calendar months. In the northern hemisphere spring
//! starts on March 1st; the southern hemisphere is shifted by six months, so
//! southern spring starts on September 1st. Whichever season starts in
//! December spans the year boundary.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar::{add_days, add_months, ymd, DateRange};
use crate::error::{DateError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Fall, Season::Winter];

    /// Month (1-12) on which this season begins.
    pub fn start_month(self, hemisphere: Hemisphere) -> u32 {
        let north = match self {
            Season::Spring => 3,
            Season::Summer => 6,
            Season::Fall => 9,
            Season::Winter => 12,
        };
        match hemisphere {
            Hemisphere::North => north,
            Hemisphere::South => (north + 5) % 12 + 1,
        }
    }

    /// Parse an English season word ("autumn" is accepted for fall).
    pub fn from_word(word: &str) -> Option<Season> {
        match word {
            "spring" | "springtime" => Some(Season::Spring),
            "summer" | "summertime" => Some(Season::Summer),
            "fall" | "autumn" => Some(Season::Fall),
            "winter" | "wintertime" => Some(Season::Winter),
            _ => None,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
            Season::Winter => "winter",
        })
    }
}

/// Which half of the globe season names refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    #[default]
    North,
    South,
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Hemisphere::North => "north",
            Hemisphere::South => "south",
        })
    }
}

impl FromStr for Hemisphere {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "north" | "northern" | "n" => Ok(Hemisphere::North),
            "south" | "southern" | "s" => Ok(Hemisphere::South),
            other => Err(DateError::InvalidHemisphere(format!("'{other}'"))),
        }
    }
}

/// The season `date` falls in.
pub fn date_to_season(date: NaiveDate, hemisphere: Hemisphere) -> Season {
    let month = date.month();
    Season::ALL
        .into_iter()
        .find(|s| (month + 12 - s.start_month(hemisphere)) % 12 < 3)
        .unwrap_or(Season::Winter)
}

/// Start and end of the season containing `date`.
pub fn season_range(date: NaiveDate, hemisphere: Hemisphere) -> Result<DateRange> {
    let start_month = date_to_season(date, hemisphere).start_month(hemisphere);
    // January and February belong to a season that started the previous December.
    let start_year = if date.month() < start_month {
        date.year() - 1
    } else {
        date.year()
    };
    let start = ymd(start_year, start_month, 1)?;
    let end = add_days(add_months(start, 3)?, -1)?;
    Ok(DateRange { start, end })
}

/// First day of `season` in `year`.
pub fn season_to_date(season: Season, year: i32, hemisphere: Hemisphere) -> Result<NaiveDate> {
    ymd(year, season.start_month(hemisphere), 1)
}

/// Earliest start of `season` on or after `date`.
pub fn next_season_date(season: Season, date: NaiveDate, hemisphere: Hemisphere) -> Result<NaiveDate> {
    let candidate = season_to_date(season, date.year(), hemisphere)?;
    if candidate >= date {
        Ok(candidate)
    } else {
        season_to_date(season, date.year() + 1, hemisphere)
    }
}

/// Latest start of `season` strictly before `date`.
pub fn last_season_date(season: Season, date: NaiveDate, hemisphere: Hemisphere) -> Result<NaiveDate> {
    let candidate = season_to_date(season, date.year(), hemisphere)?;
    if candidate < date {
        Ok(candidate)
    } else {
        season_to_date(season, date.year() - 1, hemisphere)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_start_months_rotate_by_six() {
        assert_eq!(Season::Spring.start_month(Hemisphere::North), 3);
        assert_eq!(Season::Spring.start_month(Hemisphere::South), 9);
        assert_eq!(Season::Summer.start_month(Hemisphere::South), 12);
        assert_eq!(Season::Fall.start_month(Hemisphere::South), 3);
        assert_eq!(Season::Winter.start_month(Hemisphere::South), 6);
    }

    #[test]
    fn test_date_to_season_north() {
        assert_eq!(date_to_season(date(2024, 1, 15), Hemisphere::North), Season::Winter);
        assert_eq!(date_to_season(date(2024, 3, 1), Hemisphere::North), Season::Spring);
        assert_eq!(date_to_season(date(2024, 7, 4), Hemisphere::North), Season::Summer);
        assert_eq!(date_to_season(date(2024, 11, 30), Hemisphere::North), Season::Fall);
        assert_eq!(date_to_season(date(2024, 12, 1), Hemisphere::North), Season::Winter);
    }

    #[test]
    fn test_date_to_season_south() {
        assert_eq!(date_to_season(date(2024, 1, 15), Hemisphere::South), Season::Summer);
        assert_eq!(date_to_season(date(2024, 7, 4), Hemisphere::South), Season::Winter);
        assert_eq!(date_to_season(date(2024, 10, 4), Hemisphere::South), Season::Spring);
    }

    #[test]
    fn test_late_winter_range_starts_previous_december() {
        let r = season_range(date(2117, 2, 3), Hemisphere::North).unwrap();
        assert_eq!(r.start, date(2116, 12, 1));
        assert_eq!(r.end, date(2117, 2, 28));
    }

    #[test]
    fn test_early_winter_range_ends_next_february() {
        let r = season_range(date(2023, 12, 24), Hemisphere::North).unwrap();
        assert_eq!(r.start, date(2023, 12, 1));
        // 2024 is a leap year
        assert_eq!(r.end, date(2024, 2, 29));
    }

    #[test]
    fn test_southern_summer_spans_year_boundary() {
        let r = season_range(date(2024, 1, 10), Hemisphere::South).unwrap();
        assert_eq!(r.start, date(2023, 12, 1));
        assert_eq!(r.end, date(2024, 2, 29));
    }

    #[test]
    fn test_next_season_date_rolls_over() {
        assert_eq!(
            next_season_date(Season::Spring, date(2117, 2, 3), Hemisphere::North).unwrap(),
            date(2117, 3, 1)
        );
        assert_eq!(
            next_season_date(Season::Spring, date(2117, 4, 3), Hemisphere::North).unwrap(),
            date(2118, 3, 1)
        );
        // a season starting today counts as the next one
        assert_eq!(
            next_season_date(Season::Summer, date(2117, 6, 1), Hemisphere::North).unwrap(),
            date(2117, 6, 1)
        );
    }

    #[test]
    fn test_last_season_date_is_strictly_before() {
        assert_eq!(
            last_season_date(Season::Summer, date(2117, 6, 1), Hemisphere::North).unwrap(),
            date(2116, 6, 1)
        );
        assert_eq!(
            last_season_date(Season::Winter, date(2117, 2, 3), Hemisphere::North).unwrap(),
            date(2116, 12, 1)
        );
    }

    #[test]
    fn test_hemisphere_from_str() {
        assert_eq!("Southern".parse::<Hemisphere>().unwrap(), Hemisphere::South);
        assert_eq!("north".parse::<Hemisphere>().unwrap(), Hemisphere::North);
        assert!("east".parse::<Hemisphere>().is_err());
    }

    #[test]
    fn test_season_words() {
        assert_eq!(Season::from_word("autumn"), Some(Season::Fall));
        assert_eq!(Season::from_word("fall"), Some(Season::Fall));
        assert_eq!(Season::from_word("monsoon"), None);
    }
}
