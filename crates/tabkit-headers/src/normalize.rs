//! Header normalization.

use std::collections::HashMap;

use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::{HeaderError, Result};

/// Letter case applied to normalized headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderCase {
    Lower,
    Upper,
}

/// Normalize one header: trim surrounding whitespace, apply `case`, then
/// replace each space with an underscore.
///
/// ```
/// use tabkit_headers::{HeaderCase, normalize_header};
///
/// assert_eq!(normalize_header("  Order Date  ", HeaderCase::Lower), "order_date");
/// assert_eq!(normalize_header("  Order Date  ", HeaderCase::Upper), "ORDER_DATE");
/// ```
pub fn normalize_header(name: &str, case: HeaderCase) -> String {
    let trimmed = name.trim();
    let cased = match case {
        HeaderCase::Lower => trimmed.to_lowercase(),
        HeaderCase::Upper => trimmed.to_uppercase(),
    };
    cased.replace(' ', "_")
}

/// Rename every column of `df` to its normalized header.
///
/// # Errors
///
/// [`HeaderError::Collision`] when two columns normalize to the same name;
/// the frame is dropped unchanged in that case.
pub fn standardize_headers(mut df: DataFrame, case: HeaderCase) -> Result<DataFrame> {
    let mut seen: HashMap<String, String> = HashMap::with_capacity(df.width());
    let mut renamed = Vec::with_capacity(df.width());

    for original in df.get_column_names() {
        let normalized = normalize_header(original, case);
        if let Some(first) = seen.get(&normalized) {
            return Err(HeaderError::Collision {
                normalized,
                first: first.clone(),
                second: original.to_string(),
            });
        }
        seen.insert(normalized.clone(), original.to_string());
        renamed.push(normalized);
    }

    df.set_column_names(renamed.iter().map(String::as_str))?;
    debug!(columns = renamed.len(), case = ?case, "headers normalized");
    Ok(df)
}

/// [`standardize_headers`] with lower case.
pub fn standard_headers_lower(df: DataFrame) -> Result<DataFrame> {
    standardize_headers(df, HeaderCase::Lower)
}

/// [`standardize_headers`] with upper case.
pub fn standard_headers_upper(df: DataFrame) -> Result<DataFrame> {
    standardize_headers(df, HeaderCase::Upper)
}
