//! Reference clock: decides what "today" means for date labels.

use crate::error::{MetricsError, MetricsResult};
use chrono::{Datelike, Days, Local, Months, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "mode", content = "date", rename_all = "snake_case")]
pub enum ReferenceClock {
    /// The local calendar date at call time.
    #[default]
    System,
    /// A pinned date, for tests and reproducible output.
    Fixed(NaiveDate),
}

impl ReferenceClock {
    pub fn fixed(date: NaiveDate) -> Self {
        Self::Fixed(date)
    }

    /// Parse a `YYYY-MM-DD` string into a pinned clock.
    pub fn parse_fixed(s: &str) -> MetricsResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self::Fixed)
            .map_err(|_| MetricsError::InvalidDate { value: s.to_string() })
    }

    pub fn today(&self) -> NaiveDate {
        match self {
            Self::System => Local::now().date_naive(),
            Self::Fixed(date) => *date,
        }
    }
}

/// `date` moved back by `days` calendar days.
pub fn days_before(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_sub_days(Days::new(days)).unwrap_or(NaiveDate::MIN)
}

/// `date` moved forward by `days` calendar days.
pub fn days_after(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

/// First day of the month `months` before the month containing `date`.
pub fn month_start_before(date: NaiveDate, months: u32) -> NaiveDate {
    let first = date.with_day(1).unwrap_or(date);
    first.checked_sub_months(Months::new(months)).unwrap_or(first)
}

/// "Jan 2024" style label.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn fixed_clock_returns_pinned_date() {
        let clock = ReferenceClock::fixed(d(2025, 3, 15));
        assert_eq!(clock.today(), d(2025, 3, 15));
    }

    #[test]
    fn parse_fixed_rejects_garbage() {
        assert!(ReferenceClock::parse_fixed("2025-02-30").is_err());
        assert!(ReferenceClock::parse_fixed("yesterday").is_err());
        assert_eq!(
            ReferenceClock::parse_fixed("2025-02-28").unwrap(),
            ReferenceClock::Fixed(d(2025, 2, 28))
        );
    }

    #[test]
    fn month_arithmetic_crosses_years() {
        assert_eq!(month_start_before(d(2025, 2, 17), 3), d(2024, 11, 1));
        assert_eq!(month_label(d(2024, 11, 1)), "Nov 2024");
    }

    #[test]
    fn day_arithmetic() {
        assert_eq!(days_before(d(2025, 1, 10), 10), d(2024, 12, 31));
        assert_eq!(days_after(d(2024, 12, 31), 1), d(2025, 1, 1));
    }
}
