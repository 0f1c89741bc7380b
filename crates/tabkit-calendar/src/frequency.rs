//! Date-range frequencies.
//!
//! A frequency is an optional positive multiplier followed by a unit code,
//! e.g. `D`, `3D`, `W-MON`, `2MS`. Codes are case-sensitive.
//!
//! | Code | Unit |
//! |------|------|
//! | `D` | calendar day |
//! | `B` | business day (Monday to Friday) |
//! | `W`, `W-MON` … `W-SUN` | week ending on the weekday (`W` is `W-SUN`) |
//! | `MS` | month start |
//! | `M`, `ME` | month end |
//! | `QS` | quarter start (Jan, Apr, Jul, Oct) |
//! | `Q`, `QE` | quarter end (Mar, Jun, Sep, Dec) |
//! | `YS`, `AS` | year start |
//! | `Y`, `YE`, `A` | year end |

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::CalendarError;
use crate::period::{month_end, month_start, quarter_end, quarter_start};

/// The calendar unit a frequency steps by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrequencyUnit {
    Day,
    BusinessDay,
    /// Weekly, anchored on a weekday.
    Week(Weekday),
    MonthStart,
    MonthEnd,
    QuarterStart,
    QuarterEnd,
    YearStart,
    YearEnd,
}

/// A parsed frequency: `multiple` steps of `unit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Frequency {
    multiple: u32,
    unit: FrequencyUnit,
}

impl Default for Frequency {
    fn default() -> Self {
        Self::DAILY
    }
}

impl Frequency {
    pub const DAILY: Self = Self {
        multiple: 1,
        unit: FrequencyUnit::Day,
    };

    /// A frequency of `multiple` units. The multiple must be at least 1.
    pub fn new(multiple: u32, unit: FrequencyUnit) -> Result<Self, CalendarError> {
        if multiple == 0 {
            return Err(CalendarError::InvalidFrequency {
                value: format!("0{}", unit_code(unit)),
                reason: "multiple must be at least 1".to_string(),
            });
        }
        Ok(Self { multiple, unit })
    }

    pub fn multiple(&self) -> u32 {
        self.multiple
    }

    pub fn unit(&self) -> FrequencyUnit {
        self.unit
    }

    /// Whether `date` lies on this frequency's grid.
    pub fn is_on_offset(&self, date: NaiveDate) -> bool {
        match self.unit {
            FrequencyUnit::Day => true,
            FrequencyUnit::BusinessDay => !is_weekend(date),
            FrequencyUnit::Week(weekday) => date.weekday() == weekday,
            FrequencyUnit::MonthStart => date.day() == 1,
            FrequencyUnit::MonthEnd => month_end(date) == Some(date),
            FrequencyUnit::QuarterStart => quarter_start(date) == date,
            FrequencyUnit::QuarterEnd => quarter_end(date) == Some(date),
            FrequencyUnit::YearStart => date.ordinal() == 1,
            FrequencyUnit::YearEnd => date.month() == 12 && date.day() == 31,
        }
    }

    /// The first on-offset date at or after `date`.
    pub fn roll_forward(&self, date: NaiveDate) -> Option<NaiveDate> {
        if self.is_on_offset(date) {
            return Some(date);
        }
        match self.unit {
            FrequencyUnit::Day => Some(date),
            FrequencyUnit::BusinessDay => next_business_day(date),
            FrequencyUnit::Week(weekday) => {
                let ahead = (7 + weekday.num_days_from_monday()
                    - date.weekday().num_days_from_monday())
                    % 7;
                date.checked_add_days(Days::new(u64::from(ahead)))
            }
            FrequencyUnit::MonthStart => month_start(date).checked_add_months(Months::new(1)),
            FrequencyUnit::MonthEnd => month_end(date),
            FrequencyUnit::QuarterStart => quarter_start(date).checked_add_months(Months::new(3)),
            FrequencyUnit::QuarterEnd => quarter_end(date),
            FrequencyUnit::YearStart => NaiveDate::from_ymd_opt(date.year().checked_add(1)?, 1, 1),
            FrequencyUnit::YearEnd => NaiveDate::from_ymd_opt(date.year(), 12, 31),
        }
    }

    /// The on-offset date `multiple` units after the on-offset `date`.
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        let n = self.multiple;
        match self.unit {
            FrequencyUnit::Day => date.checked_add_days(Days::new(u64::from(n))),
            FrequencyUnit::BusinessDay => {
                (0..n).try_fold(date, |current, _| next_business_day(current))
            }
            FrequencyUnit::Week(_) => date.checked_add_days(Days::new(7 * u64::from(n))),
            FrequencyUnit::MonthStart => date.checked_add_months(Months::new(n)),
            FrequencyUnit::MonthEnd => {
                month_end(month_start(date).checked_add_months(Months::new(n))?)
            }
            FrequencyUnit::QuarterStart => date.checked_add_months(Months::new(n.checked_mul(3)?)),
            FrequencyUnit::QuarterEnd => {
                let months = Months::new(n.checked_mul(3)?);
                quarter_end(month_start(date).checked_add_months(months)?)
            }
            FrequencyUnit::YearStart => {
                NaiveDate::from_ymd_opt(date.year().checked_add(i32::try_from(n).ok()?)?, 1, 1)
            }
            FrequencyUnit::YearEnd => {
                NaiveDate::from_ymd_opt(date.year().checked_add(i32::try_from(n).ok()?)?, 12, 31)
            }
        }
    }
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

fn next_business_day(date: NaiveDate) -> Option<NaiveDate> {
    let mut next = date.succ_opt()?;
    while is_weekend(next) {
        next = next.succ_opt()?;
    }
    Some(next)
}

fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "MON",
        Weekday::Tue => "TUE",
        Weekday::Wed => "WED",
        Weekday::Thu => "THU",
        Weekday::Fri => "FRI",
        Weekday::Sat => "SAT",
        Weekday::Sun => "SUN",
    }
}

fn unit_code(unit: FrequencyUnit) -> String {
    match unit {
        FrequencyUnit::Day => "D".to_string(),
        FrequencyUnit::BusinessDay => "B".to_string(),
        FrequencyUnit::Week(weekday) => format!("W-{}", weekday_code(weekday)),
        FrequencyUnit::MonthStart => "MS".to_string(),
        FrequencyUnit::MonthEnd => "ME".to_string(),
        FrequencyUnit::QuarterStart => "QS".to_string(),
        FrequencyUnit::QuarterEnd => "QE".to_string(),
        FrequencyUnit::YearStart => "YS".to_string(),
        FrequencyUnit::YearEnd => "YE".to_string(),
    }
}

fn parse_unit(code: &str) -> Option<FrequencyUnit> {
    let unit = match code {
        "D" => FrequencyUnit::Day,
        "B" => FrequencyUnit::BusinessDay,
        "W" => FrequencyUnit::Week(Weekday::Sun),
        "MS" => FrequencyUnit::MonthStart,
        "M" | "ME" => FrequencyUnit::MonthEnd,
        "QS" => FrequencyUnit::QuarterStart,
        "Q" | "QE" => FrequencyUnit::QuarterEnd,
        "YS" | "AS" => FrequencyUnit::YearStart,
        "Y" | "YE" | "A" => FrequencyUnit::YearEnd,
        _ => {
            let day = code.strip_prefix("W-")?;
            let weekday = [
                Weekday::Mon,
                Weekday::Tue,
                Weekday::Wed,
                Weekday::Thu,
                Weekday::Fri,
                Weekday::Sat,
                Weekday::Sun,
            ]
            .into_iter()
            .find(|weekday| weekday_code(*weekday) == day)?;
            FrequencyUnit::Week(weekday)
        }
    };
    Some(unit)
}

impl FromStr for Frequency {
    type Err = CalendarError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CalendarError::InvalidFrequency {
            value: value.to_string(),
            reason: reason.to_string(),
        };

        let split = value
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(value.len());
        let (digits, code) = value.split_at(split);
        let multiple = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<u32>()
                .map_err(|_| invalid("multiple is out of range"))?
        };
        if multiple == 0 {
            return Err(invalid("multiple must be at least 1"));
        }
        let unit = parse_unit(code).ok_or_else(|| invalid("unknown frequency code"))?;
        Ok(Self { multiple, unit })
    }
}

impl TryFrom<String> for Frequency {
    type Error = CalendarError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Frequency> for String {
    fn from(frequency: Frequency) -> Self {
        frequency.to_string()
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.multiple != 1 {
            write!(f, "{}", self.multiple)?;
        }
        f.write_str(&unit_code(self.unit))
    }
}
