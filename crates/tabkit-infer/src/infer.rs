//! Per-column dtype inference.

use std::path::Path;

use polars::prelude::{ChunkAgg, Column, DataFrame, DataType};
use tabkit_ingest::{ReadOptions, read_file};
use tracing::debug;

use crate::dtype::{DtypeMap, InferredDtype};
use crate::error::{InferError, Result};

/// Rows read when the caller has no preference.
pub const DEFAULT_SAMPLE_SIZE: usize = 1000;

/// Text columns whose distinct count is below this share of the rows become categorical.
const CATEGORICAL_RATIO: f64 = 0.5;

/// Largest absolute error a value may pick up when narrowed to `f32`.
const FLOAT32_TOLERANCE: f64 = 5e-4;

/// Infer dtypes from the first `sample_size` rows of a file.
///
/// # Errors
///
/// Propagates read failures; returns [`InferError::EmptySample`] when the
/// sample has no rows.
pub fn infer_dtypes(path: impl AsRef<Path>, sample_size: usize) -> Result<DtypeMap> {
    infer_dtypes_with_options(path, sample_size, &ReadOptions::default())
}

/// Like [`infer_dtypes`], with reader options. The row limit is always
/// `sample_size`.
pub fn infer_dtypes_with_options(
    path: impl AsRef<Path>,
    sample_size: usize,
    options: &ReadOptions,
) -> Result<DtypeMap> {
    let path = path.as_ref();
    let options = options.clone().with_n_rows(Some(sample_size));
    let sample = read_file(path, &options)?;
    if sample.height() == 0 {
        return Err(InferError::EmptySample {
            path: path.to_path_buf(),
        });
    }
    infer_frame_dtypes(&sample)
}

/// Infer dtypes for every column of an in-memory sample.
///
/// A zero-row frame is accepted here; integer columns then report `Int8`.
pub fn infer_frame_dtypes(sample: &DataFrame) -> Result<DtypeMap> {
    let rows = sample.height();
    let mut dtypes = DtypeMap::new();
    for column in sample.get_columns() {
        let inferred = infer_column(column, rows)?;
        debug!(
            column = %column.name(),
            source = %column.dtype(),
            inferred = %inferred,
            "inferred column dtype"
        );
        dtypes.insert(column.name().to_string(), inferred);
    }
    Ok(dtypes)
}

fn infer_column(column: &Column, rows: usize) -> Result<InferredDtype> {
    let dtype = column.dtype();
    if dtype.is_integer() {
        return Ok(infer_integer(column));
    }
    if dtype.is_float() {
        return infer_float(column);
    }
    if dtype == &DataType::String {
        let distinct = column.drop_nulls().n_unique()?;
        if (distinct as f64) < CATEGORICAL_RATIO * rows as f64 {
            return Ok(InferredDtype::Categorical);
        }
    }
    Ok(InferredDtype::Original(dtype.clone()))
}

/// Values beyond `i64` (large `UInt64`) keep their dtype.
fn infer_integer(column: &Column) -> InferredDtype {
    let Ok(widened) = column.strict_cast(&DataType::Int64) else {
        return InferredDtype::Original(column.dtype().clone());
    };
    let Ok(values) = widened.i64() else {
        return InferredDtype::Original(column.dtype().clone());
    };
    match (values.min(), values.max()) {
        (Some(min), Some(max)) => InferredDtype::smallest_int(min, max),
        _ => InferredDtype::Int8,
    }
}

/// `Float32` when every value survives the narrowing within [`FLOAT32_TOLERANCE`].
/// NaN and infinities narrow to themselves; finite values that overflow `f32` do not fit.
fn infer_float(column: &Column) -> Result<InferredDtype> {
    let widened = column.cast(&DataType::Float64)?;
    let fits_f32 = widened
        .f64()?
        .into_iter()
        .flatten()
        .all(|v| !v.is_finite() || (v - f64::from(v as f32)).abs() <= FLOAT32_TOLERANCE);
    Ok(if fits_f32 {
        InferredDtype::Float32
    } else {
        InferredDtype::Float64
    })
}
