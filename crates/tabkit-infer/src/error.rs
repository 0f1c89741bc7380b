//! Error types for dtype inference.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while inferring dtypes.
#[derive(Debug, Error)]
pub enum InferError {
    /// Reading the sample failed.
    #[error(transparent)]
    Read(#[from] tabkit_ingest::IngestError),

    /// The sample contained no rows, so no dtype can be justified.
    #[error("sample from {path} has no rows")]
    EmptySample { path: PathBuf },

    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

/// Result type for inference operations.
pub type Result<T> = std::result::Result<T, InferError>;
