//! Date-table options.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, Result};
use crate::frequency::Frequency;

/// Input to [`build_date_table`](crate::build_date_table).
///
/// ```
/// use chrono::NaiveDate;
/// use tabkit_calendar::DateTableOptions;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let options = DateTableOptions::new(start)
///     .with_periods(366)
///     .with_eval_date("2024-06-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateTableOptions {
    pub start_date: NaiveDate,

    /// Last date (inclusive). Mutually exclusive with `periods`.
    #[serde(default)]
    pub end_date: Option<NaiveDate>,

    #[serde(default)]
    pub periods: Option<usize>,

    #[serde(default)]
    pub freq: Frequency,

    /// Reference "today" as `YYYY-MM-DD`. Defaults to the generation time.
    #[serde(default)]
    pub eval_date: Option<String>,
}

impl DateTableOptions {
    /// Daily table from `start_date`; set an end date or a period count next.
    pub fn new(start_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date: None,
            periods: None,
            freq: Frequency::DAILY,
            eval_date: None,
        }
    }

    #[must_use]
    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    #[must_use]
    pub fn with_periods(mut self, periods: usize) -> Self {
        self.periods = Some(periods);
        self
    }

    #[must_use]
    pub fn with_freq(mut self, freq: Frequency) -> Self {
        self.freq = freq;
        self
    }

    #[must_use]
    pub fn with_eval_date(mut self, eval_date: impl Into<String>) -> Self {
        self.eval_date = Some(eval_date.into());
        self
    }

    /// The evaluation timestamp: the given date at midnight, else `now`.
    pub(crate) fn eval_timestamp(&self, now: NaiveDateTime) -> Result<NaiveDateTime> {
        match &self.eval_date {
            None => Ok(now),
            Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .map(|date| date.and_time(NaiveTime::MIN))
                .map_err(|source| CalendarError::InvalidEvalDate {
                    value: value.clone(),
                    source,
                }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let options: DateTableOptions = serde_json::from_str(
            r#"{"start_date": "2024-01-01", "periods": 10, "freq": "W-MON"}"#,
        )
        .unwrap();
        assert_eq!(options.periods, Some(10));
        assert_eq!(options.end_date, None);
        assert_eq!(options.freq.to_string(), "W-MON");
        assert_eq!(options.eval_date, None);
    }

    #[test]
    fn test_default_frequency_is_daily() {
        let options: DateTableOptions =
            serde_json::from_str(r#"{"start_date": "2024-01-01", "end_date": "2024-01-31"}"#)
                .unwrap();
        assert_eq!(options.freq, Frequency::DAILY);
    }

    #[test]
    fn test_eval_timestamp() {
        let now = NaiveDate::from_ymd_opt(2024, 5, 5)
            .unwrap()
            .and_hms_opt(13, 45, 0)
            .unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();

        let options = DateTableOptions::new(start);
        assert_eq!(options.eval_timestamp(now).unwrap(), now);

        let options = options.with_eval_date("2024-03-01");
        assert_eq!(
            options.eval_timestamp(now).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );

        let options = DateTableOptions::new(start).with_eval_date("03/01/2024");
        assert!(matches!(
            options.eval_timestamp(now),
            Err(CalendarError::InvalidEvalDate { .. })
        ));
    }
}
