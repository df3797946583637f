//! Budget period service
//!
//! Resolves which budget period a date belongs to, compares periods, and
//! parses the period references users type on the command line.

use std::cmp::Ordering;

use chrono::{Local, NaiveDate};

use crate::config::settings::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetPeriod, PayDay};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The budget period `date` belongs to for a raw pay-day setting
///
/// `None`, 0 and 1 mean calendar months. Other values clamp to 31 and
/// truncate to a whole day. From the pay day onward a date belongs to the
/// next month's period.
pub fn period_for_date(date: NaiveDate, pay_day_of_month: Option<f64>) -> BudgetPeriod {
    BudgetPeriod::for_date(date, PayDay::from_setting(pay_day_of_month))
}

/// Chronological ordering of two periods, by year then month
pub fn compare_budget_periods(a: &BudgetPeriod, b: &BudgetPeriod) -> Ordering {
    (a.year(), a.month()).cmp(&(b.year(), b.month()))
}

/// Service for budget period management
pub struct PeriodService<'a> {
    settings: &'a Settings,
}

impl<'a> PeriodService<'a> {
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    pub fn pay_day(&self) -> PayDay {
        self.settings.pay_day()
    }

    /// The period today belongs to
    pub fn current_period(&self) -> BudgetPeriod {
        self.period_for_date(Local::now().date_naive())
    }

    pub fn period_for_date(&self, date: NaiveDate) -> BudgetPeriod {
        BudgetPeriod::for_date(date, self.pay_day())
    }

    pub fn next_period(&self, period: &BudgetPeriod) -> BudgetPeriod {
        period.next()
    }

    pub fn previous_period(&self, period: &BudgetPeriod) -> BudgetPeriod {
        period.prev()
    }

    /// Parse a period string or fall back to the current period
    pub fn parse_or_current(&self, period_str: Option<&str>) -> BudgetResult<BudgetPeriod> {
        match period_str {
            Some(s) => self.parse(s),
            None => Ok(self.current_period()),
        }
    }

    /// Parse a period reference
    ///
    /// Formats supported:
    /// - "current", "now", "this", "last", "prev", "previous", "next"
    /// - month names with optional year: "January 2025", "jan"
    /// - "2025-01"
    pub fn parse(&self, s: &str) -> BudgetResult<BudgetPeriod> {
        let s_lower = s.trim().to_lowercase();

        match s_lower.as_str() {
            "current" | "now" | "this" => return Ok(self.current_period()),
            "last" | "previous" | "prev" => {
                return Ok(self.previous_period(&self.current_period()))
            }
            "next" => return Ok(self.next_period(&self.current_period())),
            _ => {}
        }

        if let Some(period) = self.parse_month_name(&s_lower)? {
            return Ok(period);
        }

        BudgetPeriod::parse(&s_lower).map_err(|e| {
            tracing::warn!(input = s, "rejected period reference");
            BudgetError::Validation(format!("{}. Use YYYY-MM (e.g. 2025-01)", e))
        })
    }

    /// Parse "January", "jan 2025", "Sept 2024"
    ///
    /// Without a year, the most recent such month up to the current period
    /// is used.
    fn parse_month_name(&self, s: &str) -> BudgetResult<Option<BudgetPeriod>> {
        let word_end = s.find(|c: char| !c.is_alphabetic()).unwrap_or(s.len());
        let (word, rest) = s.split_at(word_end);
        if word.len() < 3 {
            return Ok(None);
        }

        let month = MONTH_NAMES
            .iter()
            .position(|name| name.to_lowercase().starts_with(word))
            .map(|index| index as u32 + 1);
        let Some(month) = month else {
            return Ok(None);
        };

        let rest = rest.trim();
        let year = if rest.is_empty() {
            let current = self.current_period();
            if month > current.month() {
                current.year() - 1
            } else {
                current.year()
            }
        } else {
            rest.parse()
                .map_err(|_| BudgetError::Validation(format!("Invalid year: {}", rest)))?
        };

        BudgetPeriod::new(year, month)
            .map(Some)
            .map_err(|e| BudgetError::Validation(e.to_string()))
    }

    /// "January 2025"
    pub fn format_period_friendly(&self, period: &BudgetPeriod) -> String {
        let name = MONTH_NAMES[(period.month() - 1) as usize];
        format!("{} {}", name, period.year())
    }

    /// "January 2025 (2024-12-27 to 2025-01-26)"
    pub fn format_period_with_range(&self, period: &BudgetPeriod) -> String {
        let (start, end) = period.date_range(self.pay_day());
        format!(
            "{} ({} to {})",
            self.format_period_friendly(period),
            start.format(&self.settings.date_format),
            end.format(&self.settings.date_format)
        )
    }

    pub fn is_current(&self, period: &BudgetPeriod) -> bool {
        *period == self.current_period()
    }
}
