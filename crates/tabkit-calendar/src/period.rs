//! Period start anchors and calendar arithmetic.
//!
//! Anchors are the first day of the year, quarter, month or ISO week (Monday)
//! that contains a date.

use chrono::{Datelike, Days, Months, NaiveDate};

/// Quarter number, 1 to 4.
pub fn quarter(date: NaiveDate) -> u32 {
    date.month0() / 3 + 1
}

pub fn year_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.ordinal0()))
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn quarter_start(date: NaiveDate) -> NaiveDate {
    year_start(date) + Months::new(3 * (quarter(date) - 1))
}

/// Monday of the ISO week. `None` only at the lower end of the date range.
pub fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(
        date.weekday().num_days_from_monday(),
    )))
}

/// Last day of the month containing `date`.
pub fn month_end(date: NaiveDate) -> Option<NaiveDate> {
    month_start(date)
        .checked_add_months(Months::new(1))?
        .pred_opt()
}

/// Last day of the quarter containing `date`.
pub fn quarter_end(date: NaiveDate) -> Option<NaiveDate> {
    quarter_start(date)
        .checked_add_months(Months::new(3))?
        .pred_opt()
}

/// Start of the year before the one containing `date`.
pub fn previous_year_start(date: NaiveDate) -> Option<NaiveDate> {
    year_start(date).checked_sub_months(Months::new(12))
}

pub fn previous_quarter_start(date: NaiveDate) -> Option<NaiveDate> {
    quarter_start(date).checked_sub_months(Months::new(3))
}

pub fn previous_month_start(date: NaiveDate) -> Option<NaiveDate> {
    month_start(date).checked_sub_months(Months::new(1))
}

pub fn previous_week_start(date: NaiveDate) -> Option<NaiveDate> {
    week_start(date)?.checked_sub_days(Days::new(7))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_anchors() {
        let date = d(2024, 2, 15);
        assert_eq!(month_start(date), d(2024, 2, 1));
        assert_eq!(quarter_start(date), d(2024, 1, 1));
        assert_eq!(year_start(date), d(2024, 1, 1));
        // Thursday
        assert_eq!(week_start(date), Some(d(2024, 2, 12)));
    }

    #[test]
    fn test_quarter_boundaries() {
        assert_eq!(quarter(d(2024, 3, 31)), 1);
        assert_eq!(quarter(d(2024, 4, 1)), 2);
        assert_eq!(quarter_start(d(2024, 12, 31)), d(2024, 10, 1));
        assert_eq!(quarter_end(d(2024, 11, 5)), Some(d(2024, 12, 31)));
    }

    #[test]
    fn test_month_end_leap_year() {
        assert_eq!(month_end(d(2024, 2, 10)), Some(d(2024, 2, 29)));
        assert_eq!(month_end(d(2023, 2, 10)), Some(d(2023, 2, 28)));
    }

    #[test]
    fn test_week_start_across_year() {
        // 2025-01-01 is a Wednesday
        assert_eq!(week_start(d(2025, 1, 1)), Some(d(2024, 12, 30)));
        assert_eq!(week_start(d(2024, 12, 30)), Some(d(2024, 12, 30)));
    }

    #[test]
    fn test_previous_periods() {
        let date = d(2024, 1, 10);
        assert_eq!(previous_year_start(date), Some(d(2023, 1, 1)));
        assert_eq!(previous_quarter_start(date), Some(d(2023, 10, 1)));
        assert_eq!(previous_month_start(date), Some(d(2023, 12, 1)));
        assert_eq!(previous_week_start(date), Some(d(2024, 1, 1)));
    }
}
