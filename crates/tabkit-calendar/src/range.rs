//! Date-range generation.

use chrono::NaiveDate;

use crate::error::{CalendarError, Result};
use crate::frequency::Frequency;

/// Generate the on-offset dates of `freq` starting at `start`.
///
/// Exactly one of `end` and `periods` must be given. The start is rolled
/// forward onto the frequency's grid; with `end`, every grid date in
/// `[start, end]` is returned, so an end before the start yields nothing.
///
/// ```
/// use chrono::NaiveDate;
/// use tabkit_calendar::{Frequency, date_range};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 30).unwrap();
/// let dates = date_range(start, None, Some(3), &Frequency::DAILY).unwrap();
/// assert_eq!(dates.last(), NaiveDate::from_ymd_opt(2024, 2, 1).as_ref());
/// ```
pub fn date_range(
    start: NaiveDate,
    end: Option<NaiveDate>,
    periods: Option<usize>,
    freq: &Frequency,
) -> Result<Vec<NaiveDate>> {
    match (end, periods) {
        (Some(end), None) => range_until(start, end, freq),
        (None, Some(periods)) => range_periods(start, periods, freq),
        (Some(_), Some(_)) => Err(CalendarError::date_range(
            "give either an end date or a number of periods, not both",
        )),
        (None, None) => Err(CalendarError::date_range(
            "an end date or a number of periods is required",
        )),
    }
}

fn range_until(start: NaiveDate, end: NaiveDate, freq: &Frequency) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    if end < start {
        return Ok(dates);
    }
    let Some(mut current) = freq.roll_forward(start) else {
        return Ok(dates);
    };
    while current <= end {
        dates.push(current);
        match freq.advance(current) {
            Some(next) => current = next,
            None => break,
        }
    }
    Ok(dates)
}

fn range_periods(start: NaiveDate, periods: usize, freq: &Frequency) -> Result<Vec<NaiveDate>> {
    let mut dates = Vec::new();
    if periods == 0 {
        return Ok(dates);
    }
    let mut current = freq.roll_forward(start).ok_or_else(CalendarError::overflow)?;
    // Every step moves at least one day, so more periods than days left cannot fit.
    let days_left = usize::try_from((NaiveDate::MAX - current).num_days()).unwrap_or(usize::MAX);
    if periods - 1 > days_left {
        return Err(CalendarError::overflow());
    }
    dates.push(current);
    while dates.len() < periods {
        current = freq.advance(current).ok_or_else(CalendarError::overflow)?;
        dates.push(current);
    }
    Ok(dates)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn freq(code: &str) -> Frequency {
        code.parse().unwrap()
    }

    #[test]
    fn test_periods() {
        let dates = date_range(d(2024, 1, 1), None, Some(3), &freq("D")).unwrap();
        assert_eq!(dates, vec![d(2024, 1, 1), d(2024, 1, 2), d(2024, 1, 3)]);
    }

    #[test]
    fn test_end_inclusive() {
        let dates = date_range(d(2024, 1, 1), Some(d(2024, 1, 10)), None, &freq("3D")).unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 1, 1), d(2024, 1, 4), d(2024, 1, 7), d(2024, 1, 10)]
        );
    }

    #[test]
    fn test_anchored_start_rolls_forward() {
        let dates = date_range(d(2024, 1, 15), Some(d(2024, 4, 30)), None, &freq("ME")).unwrap();
        assert_eq!(
            dates,
            vec![d(2024, 1, 31), d(2024, 2, 29), d(2024, 3, 31), d(2024, 4, 30)]
        );
    }

    #[test]
    fn test_business_days_skip_weekend() {
        // Friday to Tuesday
        let dates = date_range(d(2024, 1, 5), Some(d(2024, 1, 9)), None, &freq("B")).unwrap();
        assert_eq!(dates, vec![d(2024, 1, 5), d(2024, 1, 8), d(2024, 1, 9)]);
    }

    #[test]
    fn test_end_before_start_is_empty() {
        let dates = date_range(d(2024, 2, 1), Some(d(2024, 1, 1)), None, &freq("D")).unwrap();
        assert!(dates.is_empty());
    }

    #[test]
    fn test_range_specification_errors() {
        let both = date_range(d(2024, 1, 1), Some(d(2024, 1, 2)), Some(2), &freq("D"));
        assert!(matches!(both, Err(CalendarError::DateRange { .. })));

        let neither = date_range(d(2024, 1, 1), None, None, &freq("D"));
        assert!(matches!(neither, Err(CalendarError::DateRange { .. })));
    }

    #[test]
    fn test_overflow_is_an_error() {
        let result = date_range(NaiveDate::MAX, None, Some(2), &freq("D"));
        assert!(matches!(result, Err(CalendarError::DateRange { .. })));
    }

    #[test]
    fn test_unbounded_period_count_is_an_error() {
        for code in ["D", "ME", "YS"] {
            let result = date_range(d(2024, 1, 1), None, Some(usize::MAX), &freq(code));
            assert!(matches!(result, Err(CalendarError::DateRange { .. })));
        }
    }

    #[test]
    fn test_periods_up_to_the_last_date() {
        let start = NaiveDate::MAX - chrono::Days::new(2);
        let dates = date_range(start, None, Some(3), &freq("D")).unwrap();
        assert_eq!(dates.last(), Some(&NaiveDate::MAX));

        let result = date_range(start, None, Some(4), &freq("D"));
        assert!(matches!(result, Err(CalendarError::DateRange { .. })));
    }
}
