//! The `Frame` wrapper.

use std::path::Path;

use chrono::NaiveDateTime;
use polars::prelude::DataFrame;
use tabkit_calendar::{DateTableOptions, build_date_table, build_date_table_at};
use tabkit_infer::{DtypeMap, infer_frame_dtypes};
use tabkit_ingest::ReadOptions;

use crate::error::Result;

/// A DataFrame together with the operations this crate provides on it.
///
/// Only the listed operations are offered. Anything else goes through
/// [`Frame::as_dataframe`] or [`Frame::into_dataframe`].
#[derive(Debug, Clone, Default)]
pub struct Frame {
    df: DataFrame,
}

impl Frame {
    pub fn new(df: DataFrame) -> Self {
        Self { df }
    }

    /// Read a file, picking the reader from its extension.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`](crate::Error::UnsupportedFormat) for an
    /// unknown extension, [`Error::ReadFailed`](crate::Error::ReadFailed) when
    /// the reader fails.
    pub fn read_file(path: impl AsRef<Path>, options: &ReadOptions) -> Result<Self> {
        let df = tabkit_ingest::read_file(path, options)?;
        Ok(Self { df })
    }

    /// Recommend dtypes from the first `sample_size` rows of a file.
    ///
    /// # Errors
    ///
    /// Read failures as for [`Frame::read_file`], and
    /// [`Error::EmptySample`](crate::Error::EmptySample) when the sample is empty.
    pub fn infer_dtypes(path: impl AsRef<Path>, sample_size: usize) -> Result<DtypeMap> {
        Ok(tabkit_infer::infer_dtypes(path, sample_size)?)
    }

    /// Like [`Frame::infer_dtypes`], with reader options such as the SQL
    /// connection or a CSV separator. The row limit is always `sample_size`.
    pub fn infer_dtypes_with_options(
        path: impl AsRef<Path>,
        sample_size: usize,
        options: &ReadOptions,
    ) -> Result<DtypeMap> {
        Ok(tabkit_infer::infer_dtypes_with_options(
            path,
            sample_size,
            options,
        )?)
    }

    /// Recommend dtypes for the columns of this frame.
    pub fn dtypes(&self) -> Result<DtypeMap> {
        Ok(infer_frame_dtypes(&self.df)?)
    }

    /// Trim, lower-case and underscore every column name.
    pub fn standard_headers_lower(self) -> Result<Self> {
        let df = tabkit_headers::standard_headers_lower(self.df)?;
        Ok(Self { df })
    }

    /// Trim, upper-case and underscore every column name.
    pub fn standard_headers_upper(self) -> Result<Self> {
        let df = tabkit_headers::standard_headers_upper(self.df)?;
        Ok(Self { df })
    }

    /// Build a date-dimension table evaluated against the local clock.
    pub fn auto_date_table(options: &DateTableOptions) -> Result<Self> {
        let df = build_date_table(options)?;
        Ok(Self { df })
    }

    /// Build a date-dimension table with a fixed generation timestamp.
    pub fn auto_date_table_at(options: &DateTableOptions, now: NaiveDateTime) -> Result<Self> {
        let df = build_date_table_at(options, now)?;
        Ok(Self { df })
    }

    pub fn as_dataframe(&self) -> &DataFrame {
        &self.df
    }

    pub fn into_dataframe(self) -> DataFrame {
        self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn width(&self) -> usize {
        self.df.width()
    }

    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }
}

impl From<DataFrame> for Frame {
    fn from(df: DataFrame) -> Self {
        Self::new(df)
    }
}

impl From<Frame> for DataFrame {
    fn from(frame: Frame) -> Self {
        frame.df
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use polars::prelude::*;
    use tabkit_infer::InferredDtype;

    fn sample() -> Frame {
        df! {
            " Order ID " => [1i64, 2, 3],
            "Unit Price" => [1.5f64, 2.25, 3.0],
        }
        .unwrap()
        .into()
    }

    #[test]
    fn test_accessors() {
        let frame = sample();
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.column_names(), vec![" Order ID ", "Unit Price"]);
    }

    #[test]
    fn test_standard_headers() {
        let lower = sample().standard_headers_lower().unwrap();
        assert_eq!(lower.column_names(), vec!["order_id", "unit_price"]);

        let upper = lower.standard_headers_upper().unwrap();
        assert_eq!(upper.column_names(), vec!["ORDER_ID", "UNIT_PRICE"]);
    }

    #[test]
    fn test_header_collision() {
        let frame: Frame = df! {
            "Order Id" => [1i64],
            "order_id" => [2i64],
        }
        .unwrap()
        .into();
        let err = frame.standard_headers_lower().unwrap_err();
        assert!(matches!(err, Error::HeaderNormalizationFailed(_)));
    }

    #[test]
    fn test_dtypes_of_frame() {
        let dtypes = sample().dtypes().unwrap();
        assert_eq!(dtypes[" Order ID "], InferredDtype::Int8);
        assert_eq!(dtypes["Unit Price"], InferredDtype::Float32);
    }

    #[test]
    fn test_into_dataframe() {
        let df: DataFrame = sample().into();
        assert_eq!(df.shape(), (3, 2));
    }
}
