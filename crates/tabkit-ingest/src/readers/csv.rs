//! CSV reading through the Polars CSV reader.

use std::path::Path;

use polars::prelude::*;

use crate::error::ReaderError;
use crate::options::ReadOptions;

/// Reads a delimited text file into a DataFrame.
///
/// `n_rows` is pushed down to the parser so only the requested prefix is read.
pub(crate) fn read(path: &Path, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let separator = options.separator_byte()?;

    let df = CsvReadOptions::default()
        .with_has_header(options.has_header)
        .with_skip_rows(options.skip_rows)
        .with_n_rows(options.n_rows)
        .with_infer_schema_length(options.infer_schema_length)
        .map_parse_options(|parse| parse.with_separator(separator))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    Ok(df)
}
