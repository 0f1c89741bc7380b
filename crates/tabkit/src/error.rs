//! Error type for the facade.
//!
//! Wraps the per-crate errors so callers match on one enum.

use std::path::PathBuf;
use thiserror::Error;

use tabkit_calendar::CalendarError;
use tabkit_headers::HeaderError;
use tabkit_infer::InferError;
use tabkit_ingest::{FileFormat, IngestError, ReaderError};

#[derive(Debug, Error)]
pub enum Error {
    /// The file extension is not in the format table.
    #[error("unsupported file extension: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// The reader selected for the file failed.
    #[error("failed to read {format} file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        format: FileFormat,
        #[source]
        source: ReaderError,
    },

    /// Renaming the columns failed, usually because two headers collide.
    #[error("header normalization failed: {0}")]
    HeaderNormalizationFailed(#[source] HeaderError),

    /// The inference sample had no rows.
    #[error("sample from {path} has no rows")]
    EmptySample { path: PathBuf },

    #[error("date table generation failed: {0}")]
    Calendar(#[from] CalendarError),

    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

impl From<IngestError> for Error {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::UnsupportedFormat { extension } => Self::UnsupportedFormat { extension },
            IngestError::ReadFailed {
                path,
                format,
                source,
            } => Self::ReadFailed {
                path,
                format,
                source,
            },
        }
    }
}

impl From<HeaderError> for Error {
    fn from(err: HeaderError) -> Self {
        Self::HeaderNormalizationFailed(err)
    }
}

impl From<InferError> for Error {
    fn from(err: InferError) -> Self {
        match err {
            InferError::Read(read) => read.into(),
            InferError::EmptySample { path } => Self::EmptySample { path },
            InferError::DataFrame(polars) => Self::DataFrame(polars),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
