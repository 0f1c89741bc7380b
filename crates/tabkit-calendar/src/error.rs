//! Error types for calendar generation.

use thiserror::Error;

/// Errors raised while generating date ranges or date tables.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// The frequency string could not be parsed.
    #[error("invalid frequency {value:?}: {reason}")]
    InvalidFrequency { value: String, reason: String },

    /// The evaluation date is not a `YYYY-MM-DD` date.
    #[error("invalid evaluation date {value:?}: expected YYYY-MM-DD")]
    InvalidEvalDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The range is under- or over-specified, or leaves the supported date range.
    #[error("invalid date range: {message}")]
    DateRange { message: String },

    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

impl CalendarError {
    pub(crate) fn date_range(message: impl Into<String>) -> Self {
        Self::DateRange {
            message: message.into(),
        }
    }

    pub(crate) fn overflow() -> Self {
        Self::date_range("date arithmetic overflow")
    }
}

pub type Result<T> = std::result::Result<T, CalendarError>;
