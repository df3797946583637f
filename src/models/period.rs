//! Budget period representation
//!
//! A budget period is a `(year, month)` pair. When the user is paid on a
//! fixed day of the month, each period starts on that pay day in the previous
//! calendar month, so the salary received on January 27th funds February.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Latest day a pay day can be set to
pub const MAX_PAY_DAY: u32 = 31;

/// A monthly budget period
///
/// Field order matters: the derived ordering is `(year, month)` lexicographic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct BudgetPeriod {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for BudgetPeriod {
    type Error = PeriodParseError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

impl BudgetPeriod {
    /// Create a period, rejecting months outside 1-12
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The calendar month a date falls in
    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The budget period a date belongs to, given the user's pay day
    ///
    /// On or after the pay day, a date belongs to the next calendar month's
    /// period. Before it, the date stays in its own month.
    pub fn for_date(date: NaiveDate, pay_day: PayDay) -> Self {
        let calendar = Self::of_date(date);
        match pay_day.day() {
            Some(day) if date.day() >= day => calendar.next(),
            _ => calendar,
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First day of the calendar month
    pub fn start_date(&self) -> NaiveDate {
        // Always valid: month is checked on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Last day of the calendar month
    pub fn end_date(&self) -> NaiveDate {
        self.next().start_date() - Duration::days(1)
    }

    pub fn days_in_month(&self) -> u32 {
        self.end_date().day()
    }

    /// First and last date (inclusive) covered by this period for a pay day
    pub fn date_range(&self, pay_day: PayDay) -> (NaiveDate, NaiveDate) {
        let Some(day) = pay_day.day() else {
            return (self.start_date(), self.end_date());
        };

        let prev = self.prev();
        let start = if day <= prev.days_in_month() {
            NaiveDate::from_ymd_opt(prev.year, prev.month, day).unwrap_or(self.start_date())
        } else {
            self.start_date()
        };

        let end = if day <= self.days_in_month() {
            NaiveDate::from_ymd_opt(self.year, self.month, day)
                .map(|d| d - Duration::days(1))
                .unwrap_or(self.end_date())
        } else {
            self.end_date()
        };

        (start, end)
    }

    /// Check if a date belongs to this period for a pay day
    pub fn contains(&self, date: NaiveDate, pay_day: PayDay) -> bool {
        Self::for_date(date, pay_day) == *self
    }

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

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse a period string in `YYYY-MM` form
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();
        let (year, month) = s
            .split_once('-')
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;

        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = month
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month)
    }
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Normalized pay day of month
///
/// `None` means standard calendar months. Pay day 1 is the same as calendar
/// months, since every date is on or after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PayDay(Option<u32>);

impl PayDay {
    pub const CALENDAR: PayDay = PayDay(None);

    /// Normalize a whole-day pay day (0 and 1 mean calendar, >31 clamps)
    pub fn new(day: u32) -> Self {
        match day {
            0 | 1 => Self::CALENDAR,
            d => Self(Some(d.min(MAX_PAY_DAY))),
        }
    }

    /// Normalize a raw user setting
    ///
    /// Fractions are truncated and values above 31 clamp to 31. Missing,
    /// NaN, and values of 1 or less fall back to calendar months.
    pub fn from_setting(raw: Option<f64>) -> Self {
        match raw {
            Some(value) if !value.is_nan() => {
                let truncated = value.trunc();
                if truncated <= 1.0 {
                    Self::CALENDAR
                } else if truncated >= f64::from(MAX_PAY_DAY) {
                    Self(Some(MAX_PAY_DAY))
                } else {
                    Self(Some(truncated as u32))
                }
            }
            _ => Self::CALENDAR,
        }
    }

    /// The effective pay day, or `None` for calendar months
    pub fn day(&self) -> Option<u32> {
        self.0
    }

    pub fn is_calendar(&self) -> bool {
        self.0.is_none()
    }
}

impl fmt::Display for PayDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(day) => write!(f, "day {}", day),
            None => write!(f, "calendar month"),
        }
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid period format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}
