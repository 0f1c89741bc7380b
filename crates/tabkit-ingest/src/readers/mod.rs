//! Format-specific readers.
//!
//! Each reader turns one file into a DataFrame and reports failures as
//! [`ReaderError`](crate::ReaderError); the dispatcher attaches path and format.

pub(crate) mod columnar;
pub(crate) mod csv;
pub(crate) mod excel;
pub(crate) mod html;
pub(crate) mod json;
pub(crate) mod sql;
pub(crate) mod xml;

use polars::prelude::DataFrame;

/// Truncate to the requested row count for backends without a native limit.
pub(crate) fn limit_rows(df: DataFrame, n_rows: Option<usize>) -> DataFrame {
    match n_rows {
        Some(n) if df.height() > n => df.head(Some(n)),
        _ => df,
    }
}

/// Whether a row-collecting reader has gathered enough rows.
pub(crate) fn limit_reached(collected: usize, n_rows: Option<usize>) -> bool {
    n_rows.is_some_and(|n| collected >= n)
}
