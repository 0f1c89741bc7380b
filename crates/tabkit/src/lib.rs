//! DataFrame utilities.
//!
//! [`Frame`] bundles four operations over a Polars `DataFrame`:
//!
//! - reading a file of any supported format, chosen by extension
//!   ([`Frame::read_file`]);
//! - recommending memory-efficient dtypes from a sample
//!   ([`Frame::infer_dtypes`], [`Frame::dtypes`]);
//! - normalizing column headers ([`Frame::standard_headers_lower`],
//!   [`Frame::standard_headers_upper`]);
//! - generating a date-dimension table ([`Frame::auto_date_table`]).
//!
//! Each operation lives in its own crate; this one re-exports their
//! configuration types and folds their errors into [`Error`].
//!
//! # Example
//!
//! ```ignore
//! use tabkit::{Frame, ReadOptions};
//!
//! let sales = Frame::read_file("data/Sales Export.csv", &ReadOptions::default())?
//!     .standard_headers_lower()?;
//! let dtypes = sales.dtypes()?;
//! ```

mod error;
mod frame;
pub mod logging;

pub use error::{Error, Result};
pub use frame::Frame;

pub use tabkit_calendar::{DATE_TABLE_COLUMNS, DateTableOptions, Frequency, FrequencyUnit};
pub use tabkit_headers::{HeaderCase, normalize_header};
pub use tabkit_infer::{DEFAULT_SAMPLE_SIZE, DtypeMap, InferredDtype};
pub use tabkit_ingest::{FileFormat, ReadOptions, ReaderError};
