//! Dtype inference from a data sample.
//!
//! Reads the first rows of a file and recommends, per column, the narrowest
//! type that holds the sample: the smallest signed integer width, `Float32`
//! when no precision is lost, and categorical for low-cardinality text.
//!
//! # Example
//!
//! ```ignore
//! use tabkit_infer::{DEFAULT_SAMPLE_SIZE, infer_dtypes};
//!
//! let dtypes = infer_dtypes("data/sales.csv", DEFAULT_SAMPLE_SIZE)?;
//! for (column, dtype) in &dtypes {
//!     println!("{column}: {dtype}");
//! }
//! ```

mod dtype;
mod error;
mod infer;

pub use dtype::{DtypeMap, InferredDtype};
pub use error::{InferError, Result};
pub use infer::{DEFAULT_SAMPLE_SIZE, infer_dtypes, infer_dtypes_with_options, infer_frame_dtypes};
