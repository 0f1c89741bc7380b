//! Error types for header normalization.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HeaderError {
    /// Two source headers normalize to the same label.
    #[error("headers {first:?} and {second:?} both normalize to {normalized:?}")]
    Collision {
        normalized: String,
        first: String,
        second: String,
    },

    #[error("DataFrame operation failed: {0}")]
    DataFrame(#[from] polars::prelude::PolarsError),
}

pub type Result<T> = std::result::Result<T, HeaderError>;
