//! Date-dimension table generation.

use std::iter::repeat_n;

use chrono::{Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use polars::prelude::{
    Column, DataFrame, DateChunked, DatetimeChunked, IntoColumn, IntoSeries, NamedFrom,
    PolarsResult, Series, TimeUnit,
};
use tracing::info;

use crate::error::{CalendarError, Result};
use crate::options::DateTableOptions;
use crate::period::{
    month_start, previous_month_start, previous_quarter_start, previous_week_start,
    previous_year_start, quarter, quarter_start, week_start, year_start,
};
use crate::range::date_range;

/// Columns of the date table, in order.
pub const DATE_TABLE_COLUMNS: [&str; 58] = [
    "date",
    "year",
    "month",
    "quarter",
    "week_number",
    "day",
    "day_of_year",
    "day_of_week",
    "is_weekend",
    "year_start_date",
    "quarter_start_date",
    "month_start_date",
    "week_start_date",
    "creation_ts",
    "eval_date",
    "eval_year",
    "eval_month",
    "eval_quarter",
    "eval_week_number",
    "eval_day",
    "eval_day_of_year",
    "year_start_eval_date",
    "quarter_start_eval_date",
    "month_start_eval_date",
    "week_start_eval_date",
    "current_year",
    "current_quarter",
    "current_month",
    "current_week",
    "last_year",
    "last_quarter",
    "last_month",
    "last_week",
    "is_current_year",
    "is_current_quarter",
    "is_current_month",
    "is_current_week",
    "is_last_year",
    "is_last_quarter",
    "is_last_month",
    "is_last_week",
    "is_complete_year",
    "is_complete_quarter",
    "is_complete_month",
    "is_complete_week",
    "is_yoy_ytd_day_incl",
    "is_yoy_ytd_day_excl",
    "is_yoy_complete_quarter",
    "is_yoy_complete_month",
    "is_yoy_complete_week",
    "is_today_or_before",
    "is_before_today",
    "is_current_year_ytd_quarter",
    "is_current_year_ytd_month",
    "is_current_year_ytd_week",
    "is_last_year_ytd_quarter",
    "is_last_year_ytd_month",
    "is_last_year_ytd_week",
];

/// Calendar attributes of one generated date.
struct DateRow {
    date: NaiveDate,
    quarter: u32,
    year_start: NaiveDate,
    quarter_start: NaiveDate,
    month_start: NaiveDate,
    week_start: NaiveDate,
}

impl DateRow {
    fn new(date: NaiveDate) -> Result<Self> {
        Ok(Self {
            date,
            quarter: quarter(date),
            year_start: year_start(date),
            quarter_start: quarter_start(date),
            month_start: month_start(date),
            week_start: week_start(date).ok_or_else(CalendarError::overflow)?,
        })
    }
}

/// The evaluation date and the periods derived from it.
struct EvalContext {
    timestamp: NaiveDateTime,
    date: NaiveDate,
    quarter: u32,
    current_year: NaiveDate,
    current_quarter: NaiveDate,
    current_month: NaiveDate,
    current_week: NaiveDate,
    last_year: NaiveDate,
    last_quarter: NaiveDate,
    last_month: NaiveDate,
    last_week: NaiveDate,
}

impl EvalContext {
    fn new(timestamp: NaiveDateTime) -> Result<Self> {
        let date = timestamp.date();
        let overflow = CalendarError::overflow;
        Ok(Self {
            timestamp,
            date,
            quarter: quarter(date),
            current_year: year_start(date),
            current_quarter: quarter_start(date),
            current_month: month_start(date),
            current_week: week_start(date).ok_or_else(overflow)?,
            last_year: previous_year_start(date).ok_or_else(overflow)?,
            last_quarter: previous_quarter_start(date).ok_or_else(overflow)?,
            last_month: previous_month_start(date).ok_or_else(overflow)?,
            last_week: previous_week_start(date).ok_or_else(overflow)?,
        })
    }
}

fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

fn ordinal(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Columns accumulated in insertion order.
#[derive(Default)]
struct TableBuilder {
    columns: Vec<Column>,
}

impl TableBuilder {
    fn date(&mut self, name: &str, values: impl IntoIterator<Item = NaiveDate>) {
        let chunked = DateChunked::from_naive_date(name.into(), values);
        self.columns.push(chunked.into_series().into_column());
    }

    fn datetime(&mut self, name: &str, values: impl IntoIterator<Item = NaiveDateTime>) {
        let chunked =
            DatetimeChunked::from_naive_datetime(name.into(), values, TimeUnit::Nanoseconds);
        self.columns.push(chunked.into_series().into_column());
    }

    fn int32(&mut self, name: &str, values: impl IntoIterator<Item = i32>) {
        let values: Vec<i32> = values.into_iter().collect();
        self.columns.push(Series::new(name.into(), values).into_column());
    }

    fn uint32(&mut self, name: &str, values: impl IntoIterator<Item = u32>) {
        let values: Vec<u32> = values.into_iter().collect();
        self.columns.push(Series::new(name.into(), values).into_column());
    }

    fn boolean(&mut self, name: &str, values: &[bool]) {
        self.columns.push(Series::new(name.into(), values).into_column());
    }

    fn string(&mut self, name: &str, values: impl IntoIterator<Item = &'static str>) {
        let values: Vec<&str> = values.into_iter().collect();
        self.columns.push(Series::new(name.into(), values).into_column());
    }

    fn finish(self) -> PolarsResult<DataFrame> {
        DataFrame::new(self.columns)
    }
}

fn both(left: &[bool], right: &[bool]) -> Vec<bool> {
    left.iter().zip(right).map(|(l, r)| *l && *r).collect()
}

/// Build the date table, evaluating relative flags against the local clock.
///
/// The generation timestamp becomes `creation_ts` and, without an explicit
/// `eval_date`, the evaluation timestamp.
pub fn build_date_table(options: &DateTableOptions) -> Result<DataFrame> {
    build_date_table_at(options, Local::now().naive_local())
}

/// Build the date table with a fixed generation timestamp.
///
/// # Errors
///
/// [`CalendarError`] for a malformed `eval_date`, a bad range specification
/// or dates outside the supported range.
pub fn build_date_table_at(options: &DateTableOptions, now: NaiveDateTime) -> Result<DataFrame> {
    let eval_ts = options.eval_timestamp(now)?;
    let eval = EvalContext::new(eval_ts)?;
    let dates = date_range(
        options.start_date,
        options.end_date,
        options.periods,
        &options.freq,
    )?;
    let rows = dates
        .iter()
        .map(|date| DateRow::new(*date))
        .collect::<Result<Vec<_>>>()?;
    let n = rows.len();

    let flag = |predicate: &dyn Fn(&DateRow) -> bool| -> Vec<bool> {
        rows.iter().map(predicate).collect()
    };

    let mut table = TableBuilder::default();

    table.date("date", rows.iter().map(|r| r.date));
    table.int32("year", rows.iter().map(|r| r.date.year()));
    table.int32("month", rows.iter().map(|r| ordinal(r.date.month())));
    table.int32("quarter", rows.iter().map(|r| ordinal(r.quarter)));
    table.uint32("week_number", rows.iter().map(|r| r.date.iso_week().week()));
    table.int32("day", rows.iter().map(|r| ordinal(r.date.day())));
    table.int32("day_of_year", rows.iter().map(|r| ordinal(r.date.ordinal())));
    table.string("day_of_week", rows.iter().map(|r| day_name(r.date.weekday())));
    table.boolean(
        "is_weekend",
        &flag(&|r| matches!(r.date.weekday(), Weekday::Sat | Weekday::Sun)),
    );

    table.date("year_start_date", rows.iter().map(|r| r.year_start));
    table.date("quarter_start_date", rows.iter().map(|r| r.quarter_start));
    table.date("month_start_date", rows.iter().map(|r| r.month_start));
    table.date("week_start_date", rows.iter().map(|r| r.week_start));

    table.datetime("creation_ts", repeat_n(now, n));
    table.datetime("eval_date", repeat_n(eval.timestamp, n));

    table.int32("eval_year", repeat_n(eval.date.year(), n));
    table.int32("eval_month", repeat_n(ordinal(eval.date.month()), n));
    table.int32("eval_quarter", repeat_n(ordinal(eval.quarter), n));
    table.uint32("eval_week_number", repeat_n(eval.date.iso_week().week(), n));
    table.int32("eval_day", repeat_n(ordinal(eval.date.day()), n));
    table.int32("eval_day_of_year", repeat_n(ordinal(eval.date.ordinal()), n));

    // the eval-date anchors appear twice, under both names
    let anchor_names = [
        [
            "year_start_eval_date",
            "quarter_start_eval_date",
            "month_start_eval_date",
            "week_start_eval_date",
        ],
        [
            "current_year",
            "current_quarter",
            "current_month",
            "current_week",
        ],
    ];
    for [year_col, quarter_col, month_col, week_col] in anchor_names {
        table.date(year_col, repeat_n(eval.current_year, n));
        table.date(quarter_col, repeat_n(eval.current_quarter, n));
        table.date(month_col, repeat_n(eval.current_month, n));
        table.date(week_col, repeat_n(eval.current_week, n));
    }

    table.date("last_year", repeat_n(eval.last_year, n));
    table.date("last_quarter", repeat_n(eval.last_quarter, n));
    table.date("last_month", repeat_n(eval.last_month, n));
    table.date("last_week", repeat_n(eval.last_week, n));

    let is_current_year = flag(&|r| r.year_start == eval.current_year);
    let is_current_quarter = flag(&|r| r.quarter_start == eval.current_quarter);
    let is_current_month = flag(&|r| r.month_start == eval.current_month);
    let is_current_week = flag(&|r| r.week_start == eval.current_week);
    table.boolean("is_current_year", &is_current_year);
    table.boolean("is_current_quarter", &is_current_quarter);
    table.boolean("is_current_month", &is_current_month);
    table.boolean("is_current_week", &is_current_week);

    let is_last_year = flag(&|r| r.year_start == eval.last_year);
    table.boolean("is_last_year", &is_last_year);
    table.boolean("is_last_quarter", &flag(&|r| r.quarter_start == eval.last_quarter));
    table.boolean("is_last_month", &flag(&|r| r.month_start == eval.last_month));
    table.boolean("is_last_week", &flag(&|r| r.week_start == eval.last_week));

    let is_complete_quarter = flag(&|r| r.quarter_start < eval.current_quarter);
    let is_complete_month = flag(&|r| r.month_start < eval.current_month);
    let is_complete_week = flag(&|r| r.week_start < eval.current_week);
    table.boolean("is_complete_year", &flag(&|r| r.year_start < eval.current_year));
    table.boolean("is_complete_quarter", &is_complete_quarter);
    table.boolean("is_complete_month", &is_complete_month);
    table.boolean("is_complete_week", &is_complete_week);

    let is_yoy_complete_quarter = flag(&|r| r.quarter < eval.quarter);
    let is_yoy_complete_month = flag(&|r| r.date.month() < eval.date.month());
    table.boolean(
        "is_yoy_ytd_day_incl",
        &flag(&|r| r.date.ordinal() <= eval.date.ordinal()),
    );
    table.boolean(
        "is_yoy_ytd_day_excl",
        &flag(&|r| r.date.ordinal() < eval.date.ordinal()),
    );
    table.boolean("is_yoy_complete_quarter", &is_yoy_complete_quarter);
    table.boolean("is_yoy_complete_month", &is_yoy_complete_month);
    table.boolean(
        "is_yoy_complete_week",
        &flag(&|r| r.date.iso_week().week() < eval.date.iso_week().week()),
    );

    let midnight = |date: NaiveDate| date.and_time(NaiveTime::MIN);
    table.boolean(
        "is_today_or_before",
        &flag(&|r| midnight(r.date) <= eval.timestamp),
    );
    table.boolean("is_before_today", &flag(&|r| midnight(r.date) < eval.timestamp));

    table.boolean(
        "is_current_year_ytd_quarter",
        &both(&is_current_year, &is_complete_quarter),
    );
    table.boolean(
        "is_current_year_ytd_month",
        &both(&is_current_year, &is_complete_month),
    );
    table.boolean(
        "is_current_year_ytd_week",
        &both(&is_current_year, &is_complete_week),
    );

    table.boolean(
        "is_last_year_ytd_quarter",
        &both(&is_last_year, &is_yoy_complete_quarter),
    );
    // Suspected inconsistency: unlike the quarter flag, the month and week
    // variants are gated on the current year, not the last year. Existing
    // reports depend on these values, so they stay as they are.
    table.boolean(
        "is_last_year_ytd_month",
        &both(&is_current_year, &is_yoy_complete_month),
    );
    table.boolean(
        "is_last_year_ytd_week",
        &both(&is_current_year, &is_complete_week),
    );

    let df = table.finish()?;
    info!(
        rows = df.height(),
        start = %options.start_date,
        freq = %options.freq,
        eval_date = %eval.timestamp,
        "date table built"
    );
    Ok(df)
}
