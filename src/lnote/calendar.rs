//! # Calendar Engine
//!
//! Whole-day arithmetic over the proleptic Gregorian calendar. Every date
//! computation in lnote (offsets, comparisons, range enumeration) goes through
//! the Julian Day Number, so month lengths and leap years are handled here and
//! nowhere else.
//!
//! - [`CalendarDate`]: a validated `(year, month, day)` triple, years 1..=9999.
//! - [`Jdn`]: the linear day counter. Adjacent dates differ by exactly 1.
//!
//! There is no time of day and no timezone. "Today" is always supplied by the
//! caller (see [`crate::api::LnoteApi::new`]).

use crate::error::{LnoteError, Result};
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// A Julian Day Number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Jdn(pub i64);

impl Add<i64> for Jdn {
    type Output = Jdn;

    fn add(self, days: i64) -> Jdn {
        Jdn(self.0 + days)
    }
}

impl Sub<i64> for Jdn {
    type Output = Jdn;

    fn sub(self, days: i64) -> Jdn {
        Jdn(self.0 - days)
    }
}

impl Sub<Jdn> for Jdn {
    type Output = i64;

    fn sub(self, other: Jdn) -> i64 {
        self.0 - other.0
    }
}

impl fmt::Display for Jdn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A date in the proleptic Gregorian calendar.
///
/// Field order matters: the derived `Ord` is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CalendarDate {
    year: i32,
    month: u32,
    day: u32,
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

impl CalendarDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(LnoteError::Calendar(format!(
                "{:04}-{:02}-{:02} (year out of range {}..={})",
                year, month, day, MIN_YEAR, MAX_YEAR
            )));
        }
        if !(1..=12).contains(&month) || day == 0 || day > days_in_month(year, month) {
            return Err(LnoteError::Calendar(format!(
                "{:04}-{:02}-{:02}",
                year, month, day
            )));
        }
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn to_jdn(&self) -> Jdn {
        let a = (14 - self.month as i64) / 12;
        let y = self.year as i64 + 4800 - a;
        let m = self.month as i64 + 12 * a - 3;
        Jdn(self.day as i64 + (153 * m + 2) / 5 + 365 * y + y / 4 - y / 100 + y / 400 - 32045)
    }

    pub fn from_jdn(jdn: Jdn) -> Result<Self> {
        if jdn < Self::min().to_jdn() || jdn > Self::max().to_jdn() {
            return Err(LnoteError::Calendar(format!(
                "julian day {} is outside years {}..={}",
                jdn, MIN_YEAR, MAX_YEAR
            )));
        }

        let j = jdn.0 + 32044;
        let g = j / 146097;
        let dg = j % 146097;
        let c = (dg / 36524 + 1) * 3 / 4;
        let dc = dg - c * 36524;
        let b = dc / 1461;
        let db = dc % 1461;
        let a = (db / 365 + 1) * 3 / 4;
        let da = db - a * 365;
        let y = g * 400 + c * 100 + b * 4 + a;
        let m = (da * 5 + 308) / 153 - 2;
        let d = da - (m + 4) * 153 / 5 + 122;

        Ok(Self {
            year: (y - 4800 + (m + 2) / 12) as i32,
            month: ((m + 2) % 12 + 1) as u32,
            day: (d + 1) as u32,
        })
    }

    pub fn add_days(&self, days: i64) -> Result<Self> {
        let jdn = self.to_jdn().0.checked_add(days).ok_or_else(|| {
            LnoteError::Calendar(format!("{} plus {} days is out of range", self, days))
        })?;
        Self::from_jdn(Jdn(jdn))
    }

    pub fn min() -> Self {
        Self {
            year: MIN_YEAR,
            month: 1,
            day: 1,
        }
    }

    pub fn max() -> Self {
        Self {
            year: MAX_YEAR,
            month: 12,
            day: 31,
        }
    }

    pub fn weekday(&self) -> Weekday {
        // JDN 0 fell on a Monday.
        match self.to_jdn().0.rem_euclid(7) {
            0 => Weekday::Mon,
            1 => Weekday::Tue,
            2 => Weekday::Wed,
            3 => Weekday::Thu,
            4 => Weekday::Fri,
            5 => Weekday::Sat,
            _ => Weekday::Sun,
        }
    }

    pub fn first_of_month(&self) -> Self {
        Self { day: 1, ..*self }
    }

    pub fn last_of_month(&self) -> Self {
        Self {
            day: days_in_month(self.year, self.month),
            ..*self
        }
    }

    pub fn first_of_year(&self) -> Self {
        Self {
            month: 1,
            day: 1,
            ..*self
        }
    }

    pub fn last_of_year(&self) -> Self {
        Self {
            month: 12,
            day: 31,
            ..*self
        }
    }
}

impl fmt::Display for CalendarDate {
    /// Zero-padded `YYYY-MM-DD`; lexicographic order equals chronological order.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for CalendarDate {
    type Err = LnoteError;

    /// Parses the canonical `YYYY-MM-DD` form only. Looser spellings are
    /// handled by [`crate::day::DayToken::parse`].
    fn from_str(s: &str) -> Result<Self> {
        let bytes = s.as_bytes();
        let shaped = bytes.len() == 10
            && bytes[4] == b'-'
            && bytes[7] == b'-'
            && bytes
                .iter()
                .enumerate()
                .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
        if !shaped {
            return Err(LnoteError::DayFormat(s.to_string()));
        }
        let field = |range: std::ops::Range<usize>| {
            s[range]
                .parse::<u32>()
                .map_err(|_| LnoteError::DayFormat(s.to_string()))
        };
        Self::new(field(0..4)? as i32, field(5..7)?, field(8..10)?)
    }
}

impl TryFrom<String> for CalendarDate {
    type Error = LnoteError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<CalendarDate> for String {
    fn from(date: CalendarDate) -> Self {
        date.to_string()
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = LnoteError;

    fn try_from(date: NaiveDate) -> Result<Self> {
        Self::new(date.year(), date.month(), date.day())
    }
}
