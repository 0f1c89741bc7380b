//! Error types for file ingestion.

use std::path::PathBuf;
use thiserror::Error;

use crate::format::FileFormat;
use crate::sas::XptError;

/// Errors surfaced by the reader dispatcher.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The file extension is not in the format table.
    #[error("unsupported file extension: {extension:?}")]
    UnsupportedFormat { extension: String },

    /// The format-specific reader failed.
    #[error("failed to read {format} file {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        format: FileFormat,
        #[source]
        source: ReaderError,
    },
}

impl IngestError {
    /// The format the dispatcher selected, if it got that far.
    pub fn format(&self) -> Option<FileFormat> {
        match self {
            Self::UnsupportedFormat { .. } => None,
            Self::ReadFailed { format, .. } => Some(*format),
        }
    }
}

/// Underlying cause of a [`IngestError::ReadFailed`].
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("DataFrame operation failed: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    #[error("workbook error: {message}")]
    Excel { message: String },

    #[error("HTML error: {message}")]
    Html { message: String },

    #[error("XML error: {message}")]
    Xml { message: String },

    #[error("SQL error: {0}")]
    Sql(#[from] sqlx::Error),

    #[error("SAS transport error: {0}")]
    Sas(#[from] XptError),

    /// A reader needs an option the caller did not supply.
    #[error("missing required option '{option}'")]
    MissingOption { option: &'static str },

    #[error("invalid option '{option}': {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    /// The format is recognized but no reader backend is compiled in.
    #[error("no reader backend available for {format} files")]
    Unavailable { format: FileFormat },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
