//! Date range and calendar month models.
//!
//! This module contains the [`DateRange`] and [`MonthKey`] types used to describe
//! the calendar window of a payroll or aggregation request.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{EngineError, EngineResult};

/// An inclusive window of calendar days.
///
/// Both bounds belong to the window. A range whose end precedes its start is
/// well-formed but empty: it contains no days and produces zero-valued results.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DateRange;
/// use chrono::NaiveDate;
///
/// let range = DateRange::new(
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
/// );
///
/// assert_eq!(range.day_count(), 31);
/// assert!(range.contains(NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()));
///
/// let inverted = DateRange::new(
///     NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
///     NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
/// );
/// assert!(inverted.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    /// The first day of the range (inclusive).
    pub start: NaiveDate,
    /// The last day of the range (inclusive).
    pub end: NaiveDate,
}

impl DateRange {
    /// Creates a range from its inclusive bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Parses a range from two ISO `YYYY-MM-DD` strings.
    ///
    /// This is the boundary check for caller-supplied dates: anything that is
    /// not a real calendar day is rejected with [`EngineError::InvalidRange`].
    /// An inverted but well-formed pair parses successfully into an empty range.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::DateRange;
    ///
    /// let range = DateRange::parse("2026-01-01", "2026-12-31").unwrap();
    /// assert_eq!(range.day_count(), 365);
    ///
    /// assert!(DateRange::parse("2026-02-30", "2026-03-01").is_err());
    /// ```
    pub fn parse(start: &str, end: &str) -> EngineResult<Self> {
        Ok(Self::new(parse_day(start)?, parse_day(end)?))
    }

    /// Creates the range covering a whole calendar month.
    pub fn for_month(month: MonthKey) -> Self {
        Self::new(month.first_day(), month.last_day())
    }

    /// Returns true if the range contains no days (end before start).
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }

    /// Checks if a given date falls within this range, inclusive of both bounds.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }

    /// Returns the number of days in the range, zero when inverted.
    pub fn day_count(&self) -> u32 {
        if self.is_empty() {
            return 0;
        }
        (self.end - self.start).num_days() as u32 + 1
    }

    /// Returns the overlap of two ranges, or `None` if they share no day.
    pub fn intersect(&self, other: &DateRange) -> Option<DateRange> {
        let overlap = DateRange::new(self.start.max(other.start), self.end.min(other.end));
        (!overlap.is_empty()).then_some(overlap)
    }

    /// Iterates every calendar day from start to end inclusive.
    ///
    /// Yields nothing for an inverted range.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }

    /// Iterates every calendar month the range touches, in ascending order.
    ///
    /// Yields nothing for an inverted range.
    pub fn months(&self) -> impl Iterator<Item = MonthKey> {
        let last = MonthKey::from_date(self.end);
        let first = (!self.is_empty()).then(|| MonthKey::from_date(self.start));
        std::iter::successors(first, move |month| {
            let next = month.next();
            (next <= last).then_some(next)
        })
    }
}

fn parse_day(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| EngineError::InvalidRange {
        message: format!("'{}' is not a calendar date: {}", value, e),
    })
}

/// A calendar month, ordered chronologically.
///
/// Serializes as `"YYYY-MM"`.
///
/// # Example
///
/// ```
/// use payroll_engine::models::MonthKey;
/// use chrono::NaiveDate;
///
/// let february = MonthKey::new(2024, 2).unwrap();
/// assert_eq!(february.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
/// assert_eq!(february.next(), MonthKey::new(2024, 3).unwrap());
/// assert_eq!(february.to_string(), "2024-02");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Creates a month key, returning `None` if `month` is not in `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Returns the month containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month, `1..=12`.
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The following calendar month.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// The first day of the month.
    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("MonthKey always holds a valid month")
    }

    /// The last day of the month, leap-aware.
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| format!("expected YYYY-MM, got '{}'", s))?;
        let year = year
            .parse::<i32>()
            .map_err(|e| format!("invalid year in '{}': {}", s, e))?;
        let month = month
            .parse::<u32>()
            .map_err(|e| format!("invalid month in '{}': {}", s, e))?;
        MonthKey::new(year, month).ok_or_else(|| format!("month out of range in '{}'", s))
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
