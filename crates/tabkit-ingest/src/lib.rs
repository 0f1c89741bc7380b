//! Tabular file ingestion.
//!
//! This crate reads files of many formats into Polars DataFrames, choosing
//! the reader from the file extension.
//!
//! # Formats
//!
//! | Extension | Backend |
//! |-----------|---------|
//! | `.csv` | Polars CSV reader |
//! | `.xlsx` | calamine |
//! | `.json` | Polars JSON reader |
//! | `.html` | scraper |
//! | `.sql`, `.sql_query`, `.sql_table` | sqlx (SQLite) |
//! | `.parquet` | Polars Parquet reader |
//! | `.feather` | Polars IPC reader |
//! | `.sas` | built-in XPORT v5 decoder |
//! | `.xml` | quick-xml |
//! | `.orc`, `.stata`, `.pickle`, `.clipboard`, `.hdf`, `.gbq` | none |
//!
//! Formats without a backend are recognized but fail with
//! [`ReaderError::Unavailable`].
//!
//! # Example
//!
//! ```ignore
//! use tabkit_ingest::{ReadOptions, read_file};
//!
//! let df = read_file("data/sales.csv", &ReadOptions::default())?;
//! let first_ten = read_file("data/sales.parquet", &ReadOptions::default().with_n_rows(Some(10)))?;
//! ```

mod dispatch;
mod error;
mod format;
mod frame_builder;
mod options;
mod readers;
mod sas;

// === Error Types ===
pub use error::{IngestError, ReaderError, Result};
pub use sas::XptError;

// === Format Table ===
pub use format::FileFormat;

// === Reading ===
pub use dispatch::{detect_format, file_extension, read_file, read_with_format};
pub use options::ReadOptions;
