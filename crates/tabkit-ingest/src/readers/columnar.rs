//! Columnar binary formats: Parquet and Feather (Arrow IPC).

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::ReaderError;
use crate::options::ReadOptions;

use super::limit_rows;

pub(crate) fn read_parquet(path: &Path, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let file = File::open(path)?;
    let df = ParquetReader::new(file).finish()?;
    Ok(limit_rows(df, options.n_rows))
}

pub(crate) fn read_feather(path: &Path, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let file = File::open(path)?;
    let df = IpcReader::new(file).finish()?;
    Ok(limit_rows(df, options.n_rows))
}
