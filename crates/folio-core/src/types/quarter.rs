//! Fiscal quarter arithmetic.
//!
//! All multi-period selection logic (trailing windows, year-over-year
//! lookups) is expressed in terms of [`FiscalQuarter`] arithmetic, by
//! calendar quarter rather than by row count.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{CoreError, CoreResult};

/// A calendar year plus quarter number (1..=4).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct FiscalQuarter {
    /// Calendar year.
    year: i32,
    /// Quarter number, 1..=4.
    quarter: u8,
}

impl FiscalQuarter {
    /// Create a fiscal quarter, validating the quarter number.
    pub fn new(year: i32, quarter: u8) -> CoreResult<Self> {
        if !(1..=4).contains(&quarter) {
            return Err(CoreError::InvalidQuarter(quarter));
        }
        Ok(Self { year, quarter })
    }

    /// The fiscal quarter containing a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            quarter: ((date.month0() / 3) + 1) as u8,
        }
    }

    /// Calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Quarter number, 1..=4.
    pub fn quarter(&self) -> u8 {
        self.quarter
    }

    /// Zero-based quarter count since year 0. Two quarters are calendar
    /// adjacent exactly when their ordinals differ by one.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 4 + i64::from(self.quarter) - 1
    }

    /// The immediately preceding calendar quarter.
    pub fn prev(&self) -> Self {
        self.minus_quarters(1)
    }

    /// The immediately following calendar quarter.
    pub fn next(&self) -> Self {
        match self.quarter {
            4 => Self {
                year: self.year + 1,
                quarter: 1,
            },
            q => Self {
                year: self.year,
                quarter: q + 1,
            },
        }
    }

    /// The quarter `n` calendar quarters before this one.
    pub fn minus_quarters(&self, n: u32) -> Self {
        let ord = self.ordinal() - i64::from(n);
        Self {
            year: (ord.div_euclid(4)) as i32,
            quarter: (ord.rem_euclid(4) + 1) as u8,
        }
    }

    /// The same-numbered quarter one year earlier.
    pub fn same_quarter_prior_year(&self) -> Self {
        self.minus_quarters(4)
    }

    /// True when `other` is the calendar quarter immediately before `self`.
    pub fn follows(&self, other: &FiscalQuarter) -> bool {
        self.ordinal() == other.ordinal() + 1
    }

    /// First calendar day of the quarter.
    pub fn start_date(&self) -> NaiveDate {
        let month = u32::from(self.quarter - 1) * 3 + 1;
        NaiveDate::from_ymd_opt(self.year, month, 1)
            .unwrap_or_else(|| panic!("invalid quarter start {}-{}", self.year, month))
    }

    /// Last calendar day of the quarter.
    pub fn end_date(&self) -> NaiveDate {
        self.next().start_date().pred_opt().unwrap_or_else(|| {
            panic!("invalid quarter end for {}", self)
        })
    }

    /// True when `date` falls inside this quarter.
    pub fn contains(&self, date: NaiveDate) -> bool {
        Self::from_date(date) == *self
    }
}

impl fmt::Display for FiscalQuarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}Q{}", self.year, self.quarter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(year: i32, quarter: u8) -> FiscalQuarter {
        FiscalQuarter::new(year, quarter).unwrap()
    }

    #[test]
    fn rejects_quarter_out_of_range() {
        assert!(FiscalQuarter::new(2023, 0).is_err());
        assert!(FiscalQuarter::new(2023, 5).is_err());
        assert!(FiscalQuarter::new(2023, 4).is_ok());
    }

    #[test]
    fn prev_and_next_cross_year_boundaries() {
        assert_eq!(q(2023, 1).prev(), q(2022, 4));
        assert_eq!(q(2022, 4).next(), q(2023, 1));
        assert_eq!(q(2023, 3).prev(), q(2023, 2));
    }

    #[test]
    fn minus_quarters_walks_back_by_calendar_quarter() {
        assert_eq!(q(2023, 2).minus_quarters(4), q(2022, 2));
        assert_eq!(q(2023, 2).minus_quarters(3), q(2022, 3));
        assert_eq!(q(2023, 1).minus_quarters(1), q(2022, 4));
        assert_eq!(q(2023, 2).minus_quarters(0), q(2023, 2));
    }

    #[test]
    fn same_quarter_prior_year_keeps_quarter_number() {
        let prior = q(2023, 2).same_quarter_prior_year();
        assert_eq!(prior, q(2022, 2));
        assert_eq!(prior.quarter(), 2);
    }

    #[test]
    fn follows_detects_only_adjacent_quarters() {
        assert!(q(2023, 1).follows(&q(2022, 4)));
        assert!(!q(2023, 2).follows(&q(2022, 4)));
        assert!(!q(2022, 4).follows(&q(2023, 1)));
    }

    #[test]
    fn date_round_trip() {
        let date = NaiveDate::from_ymd_opt(2023, 6, 30).unwrap();
        assert_eq!(FiscalQuarter::from_date(date), q(2023, 2));
        assert!(q(2023, 2).contains(date));
        assert!(!q(2023, 3).contains(date));
    }

    #[test]
    fn quarter_boundaries() {
        assert_eq!(
            q(2023, 2).start_date(),
            NaiveDate::from_ymd_opt(2023, 4, 1).unwrap()
        );
        assert_eq!(
            q(2023, 2).end_date(),
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap()
        );
        assert_eq!(
            q(2023, 4).end_date(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }
}
