//! Extension-based reader dispatch.

use std::path::Path;

use polars::prelude::DataFrame;
use tracing::{debug, warn};

use crate::error::{IngestError, ReaderError, Result};
use crate::format::FileFormat;
use crate::options::ReadOptions;
use crate::{readers, sas};

/// The extension of `path` with its leading dot, or `""` when there is none.
///
/// Only the last extension counts: `data.tar.gz` yields `.gz`.
pub fn file_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default()
}

/// Select the format for `path` from its extension.
pub fn detect_format(path: &Path) -> Result<FileFormat> {
    let extension = file_extension(path);
    FileFormat::from_extension(&extension)
        .ok_or(IngestError::UnsupportedFormat { extension })
}

/// Read a file into a DataFrame, choosing the reader from its extension.
///
/// # Errors
///
/// [`IngestError::UnsupportedFormat`] when the extension is not in the format
/// table; [`IngestError::ReadFailed`] when the selected reader fails, including
/// formats that have no reader backend.
pub fn read_file(path: impl AsRef<Path>, options: &ReadOptions) -> Result<DataFrame> {
    let path = path.as_ref();
    let format = detect_format(path).inspect_err(|err| {
        warn!(path = %path.display(), error = %err, "no reader for file");
    })?;
    read_with_format(path, format, options)
}

/// Read a file with an explicitly chosen format, ignoring its extension.
pub fn read_with_format(
    path: impl AsRef<Path>,
    format: FileFormat,
    options: &ReadOptions,
) -> Result<DataFrame> {
    let path = path.as_ref();
    debug!(path = %path.display(), format = %format, "reading file");

    let df = dispatch(path, format, options).map_err(|source| IngestError::ReadFailed {
        path: path.to_path_buf(),
        format,
        source,
    })?;

    debug!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "file loaded"
    );
    Ok(df)
}

fn dispatch(
    path: &Path,
    format: FileFormat,
    options: &ReadOptions,
) -> std::result::Result<DataFrame, ReaderError> {
    match format {
        FileFormat::Csv => readers::csv::read(path, options),
        FileFormat::Excel => readers::excel::read(path, options),
        FileFormat::Json => readers::json::read(path, options),
        FileFormat::Html => readers::html::read(path, options),
        FileFormat::Sql | FileFormat::SqlQuery => readers::sql::read_query(path, options),
        FileFormat::SqlTable => readers::sql::read_table(path, options),
        FileFormat::Parquet => readers::columnar::read_parquet(path, options),
        FileFormat::Feather => readers::columnar::read_feather(path, options),
        FileFormat::Sas => sas::read(path, options),
        FileFormat::Xml => readers::xml::read(path, options),
        FileFormat::Orc
        | FileFormat::Stata
        | FileFormat::Pickle
        | FileFormat::Clipboard
        | FileFormat::Hdf
        | FileFormat::BigQuery => Err(ReaderError::Unavailable { format }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension(Path::new("sales.csv")), ".csv");
        assert_eq!(file_extension(Path::new("dir/archive.tar.gz")), ".gz");
        assert_eq!(file_extension(Path::new("README")), "");
        assert_eq!(file_extension(Path::new("orders.sql_table")), ".sql_table");
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(Path::new("a/b/data.parquet")).unwrap(),
            FileFormat::Parquet
        );
        assert_eq!(
            detect_format(Path::new("query.gbq")).unwrap(),
            FileFormat::BigQuery
        );
        let err = detect_format(Path::new("data.txt")).unwrap_err();
        assert!(matches!(
            err,
            IngestError::UnsupportedFormat { ref extension } if extension == ".txt"
        ));
    }

    #[test]
    fn test_unavailable_backend_matches_has_backend() {
        for format in FileFormat::ALL {
            let result = dispatch(Path::new("/nonexistent/file"), format, &ReadOptions::default());
            let unavailable = matches!(result, Err(ReaderError::Unavailable { .. }));
            assert_eq!(unavailable, !format.has_backend(), "{format}");
        }
    }
}
