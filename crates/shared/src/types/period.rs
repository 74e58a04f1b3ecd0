//! Accounting period values.
//!
//! A period is a `(year, month)` pair. Every accrual and every report is
//! keyed by an explicit period passed in by the caller; nothing in the
//! engine reads the process clock.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A calendar accounting period (one month).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Period {
    /// Calendar year.
    pub year: i32,
    /// Calendar month (1-12).
    pub month: u32,
}

impl Period {
    /// Creates a validated period.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` if the month is outside 1-12 or the
    /// year is not a plausible accounting year.
    pub fn new(year: i32, month: u32) -> Result<Self, AppError> {
        if !(1..=12).contains(&month) {
            return Err(AppError::Validation(format!(
                "month must be between 1 and 12, got {month}"
            )));
        }
        if !(1990..=2100).contains(&year) {
            return Err(AppError::Validation(format!(
                "year must be between 1990 and 2100, got {year}"
            )));
        }
        Ok(Self { year, month })
    }

    /// The period containing the given date.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First calendar day of the period, used as the posting date for
    /// period-keyed entries.
    #[must_use]
    pub fn first_day(&self) -> NaiveDate {
        // Month is validated on construction, so this cannot fail.
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or_else(|| NaiveDate::from_ymd_opt(self.year, 1, 1).expect("valid year"))
    }

    /// The following period.
    #[must_use]
    pub const fn next(&self) -> Self {
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

    /// Number of whole months from `earlier` to `self`.
    ///
    /// Negative when `earlier` is actually later than `self`.
    #[must_use]
    pub const fn months_since(&self, earlier: Self) -> i32 {
        (self.year - earlier.year) * 12 + self.month as i32 - earlier.month as i32
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}.{}", self.month, self.year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_new_valid() {
        let period = Period::new(2026, 3).unwrap();
        assert_eq!(period.year, 2026);
        assert_eq!(period.month, 3);
    }

    #[rstest]
    #[case(2026, 0)]
    #[case(2026, 13)]
    #[case(1800, 6)]
    #[case(3000, 6)]
    fn test_new_rejects_out_of_range(#[case] year: i32, #[case] month: u32) {
        assert!(matches!(
            Period::new(year, month),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_from_date() {
        let date = NaiveDate::from_ymd_opt(2026, 7, 15).unwrap();
        assert_eq!(Period::from_date(date), Period { year: 2026, month: 7 });
    }

    #[test]
    fn test_first_day() {
        let period = Period::new(2026, 2).unwrap();
        assert_eq!(
            period.first_day(),
            NaiveDate::from_ymd_opt(2026, 2, 1).unwrap()
        );
    }

    #[test]
    fn test_next_wraps_year() {
        let december = Period::new(2025, 12).unwrap();
        assert_eq!(december.next(), Period { year: 2026, month: 1 });

        let june = Period::new(2026, 6).unwrap();
        assert_eq!(june.next(), Period { year: 2026, month: 7 });
    }

    #[test]
    fn test_months_since() {
        let start = Period::new(2025, 11).unwrap();
        let target = Period::new(2026, 2).unwrap();
        assert_eq!(target.months_since(start), 3);
        assert_eq!(start.months_since(target), -3);
        assert_eq!(target.months_since(target), 0);
    }

    #[test]
    fn test_ordering_is_chronological() {
        let a = Period::new(2025, 12).unwrap();
        let b = Period::new(2026, 1).unwrap();
        let c = Period::new(2026, 2).unwrap();
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_display() {
        assert_eq!(Period::new(2026, 3).unwrap().to_string(), "03.2026");
        assert_eq!(Period::new(2026, 11).unwrap().to_string(), "11.2026");
    }
}
