//! JSON reading through the Polars JSON reader.

use std::fs::File;
use std::path::Path;

use polars::prelude::*;

use crate::error::ReaderError;
use crate::options::ReadOptions;

use super::limit_rows;

/// Reads a JSON array of records, or newline-delimited records when
/// `json_lines` is set.
pub(crate) fn read(path: &Path, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let file = File::open(path)?;
    let format = if options.json_lines {
        JsonFormat::JsonLines
    } else {
        JsonFormat::Json
    };

    let df = JsonReader::new(file).with_json_format(format).finish()?;

    Ok(limit_rows(df, options.n_rows))
}
