//! Column header normalization.
//!
//! Headers are trimmed, case-folded and have spaces replaced with
//! underscores. Renaming consumes the DataFrame and returns the renamed one;
//! two columns that would end up with the same name are an error rather than
//! a silent overwrite.

mod error;
mod normalize;

pub use error::{HeaderError, Result};
pub use normalize::{
    HeaderCase, normalize_header, standard_headers_lower, standard_headers_upper,
    standardize_headers,
};
