//! Calendar generation.
//!
//! Produces date ranges over day, business-day, week, month, quarter and
//! year frequencies, and date-dimension tables: one row per date with
//! calendar attributes, period anchors and flags relative to an evaluation
//! date ("today").
//!
//! # Example
//!
//! ```ignore
//! use chrono::NaiveDate;
//! use tabkit_calendar::{DateTableOptions, build_date_table};
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let options = DateTableOptions::new(start).with_periods(366);
//! let table = build_date_table(&options)?;
//! assert_eq!(table.width(), 58);
//! ```

mod error;
mod frequency;
mod options;
pub mod period;
mod range;
mod table;

pub use error::{CalendarError, Result};
pub use frequency::{Frequency, FrequencyUnit};
pub use options::DateTableOptions;
pub use range::date_range;
pub use table::{DATE_TABLE_COLUMNS, build_date_table, build_date_table_at};
