//! Calendar-month window
//!
//! Every monthly aggregation in the crate works over the inclusive range
//! from the first to the last calendar day of a (year, month) pair. [`Month`]
//! is valid by construction so downstream code never re-checks month bounds.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single calendar month (e.g. "2024-01")
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Month {
    year: i32,
    month: u32,
}

impl Month {
    /// Create a month, rejecting out-of-range month numbers
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    /// The month a date falls in
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// First calendar day of the month
    pub fn first_day(&self) -> NaiveDate {
        // month is 1..=12 by construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last calendar day of the month (inclusive; leap years honored)
    pub fn last_day(&self) -> NaiveDate {
        self.next().first_day() - Duration::days(1)
    }

    /// Check if a date falls within this month
    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// The following month
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

    /// The preceding month
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

    /// Inclusive range of consecutive months from `self` through `end`
    ///
    /// Empty when `end` precedes `self`. The returned iterator is `Clone`, so
    /// callers can restart iteration from the beginning at any time.
    pub fn range_to(&self, end: Month) -> MonthRange {
        MonthRange {
            next: if *self <= end { Some(*self) } else { None },
            end,
        }
    }

    /// The window of `n` consecutive months ending at `self` (oldest first)
    pub fn window_ending(&self, n: u32) -> MonthRange {
        if n == 0 {
            return MonthRange {
                next: None,
                end: *self,
            };
        }
        let mut start = *self;
        for _ in 1..n {
            start = start.prev();
        }
        start.range_to(*self)
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Inclusive, restartable iterator over consecutive months
#[derive(Debug, Clone)]
pub struct MonthRange {
    next: Option<Month>,
    end: Month,
}

impl Iterator for MonthRange {
    type Item = Month;

    fn next(&mut self) -> Option<Month> {
        let current = self.next?;
        self.next = if current < self.end {
            Some(current.next())
        } else {
            None
        };
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_bad_month() {
        assert!(Month::new(2024, 0).is_none());
        assert!(Month::new(2024, 13).is_none());
        assert!(Month::new(2024, 12).is_some());
    }

    #[test]
    fn test_window_bounds() {
        let jan = Month::new(2024, 1).unwrap();
        assert_eq!(jan.first_day(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(jan.last_day(), NaiveDate::from_ymd_opt(2024, 1, 31).unwrap());
    }

    #[test]
    fn test_leap_year_february() {
        let feb = Month::new(2024, 2).unwrap();
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());

        let feb = Month::new(2025, 2).unwrap();
        assert_eq!(feb.last_day(), NaiveDate::from_ymd_opt(2025, 2, 28).unwrap());
    }

    #[test]
    fn test_contains() {
        let jan = Month::new(2024, 1).unwrap();
        assert!(jan.contains(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(jan.contains(NaiveDate::from_ymd_opt(2024, 1, 31).unwrap()));
        assert!(!jan.contains(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()));
        assert!(!jan.contains(NaiveDate::from_ymd_opt(2023, 1, 15).unwrap()));
    }

    #[test]
    fn test_next_prev_across_year_boundary() {
        let dec = Month::new(2024, 12).unwrap();
        assert_eq!(dec.next(), Month::new(2025, 1).unwrap());
        assert_eq!(Month::new(2025, 1).unwrap().prev(), dec);
    }

    #[test]
    fn test_range_inclusive() {
        let jan = Month::new(2024, 1).unwrap();
        let mar = Month::new(2024, 3).unwrap();
        let months: Vec<Month> = jan.range_to(mar).collect();
        assert_eq!(
            months,
            vec![jan, Month::new(2024, 2).unwrap(), mar]
        );
    }

    #[test]
    fn test_range_is_restartable() {
        let jan = Month::new(2024, 1).unwrap();
        let range = jan.range_to(Month::new(2024, 6).unwrap());
        assert_eq!(range.clone().count(), 6);
        assert_eq!(range.count(), 6);
    }

    #[test]
    fn test_empty_range() {
        let mar = Month::new(2024, 3).unwrap();
        let jan = Month::new(2024, 1).unwrap();
        assert_eq!(mar.range_to(jan).count(), 0);
    }

    #[test]
    fn test_window_ending_crosses_year() {
        let feb = Month::new(2024, 2).unwrap();
        let months: Vec<Month> = feb.window_ending(4).collect();
        assert_eq!(
            months,
            vec![
                Month::new(2023, 11).unwrap(),
                Month::new(2023, 12).unwrap(),
                Month::new(2024, 1).unwrap(),
                feb,
            ]
        );
    }

    #[test]
    fn test_window_ending_zero_is_empty() {
        let feb = Month::new(2024, 2).unwrap();
        assert_eq!(feb.window_ending(0).count(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(Month::new(2024, 3).unwrap().to_string(), "2024-03");
    }
}
