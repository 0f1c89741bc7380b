//! Column type descriptors produced by inference.

use std::collections::BTreeMap;
use std::fmt;

use polars::prelude::DataType;

/// The dtype recommended for one column.
#[derive(Debug, Clone, PartialEq)]
pub enum InferredDtype {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    /// Low-cardinality text.
    Categorical,
    /// No narrower type applies; the column keeps the dtype it was read with.
    Original(DataType),
}

/// Inferred dtype per column name.
pub type DtypeMap = BTreeMap<String, InferredDtype>;

impl InferredDtype {
    /// Short name: `int8` … `float64`, `category`, or the original dtype's name.
    pub fn name(&self) -> String {
        match self {
            Self::Int8 => "int8".to_string(),
            Self::Int16 => "int16".to_string(),
            Self::Int32 => "int32".to_string(),
            Self::Int64 => "int64".to_string(),
            Self::Float32 => "float32".to_string(),
            Self::Float64 => "float64".to_string(),
            Self::Categorical => "category".to_string(),
            Self::Original(dtype) => dtype.to_string(),
        }
    }

    /// The Polars dtype to cast to, when there is a direct one.
    ///
    /// `Categorical` has none: the category mapping is chosen by the caller.
    pub fn to_dtype(&self) -> Option<DataType> {
        match self {
            Self::Int8 => Some(DataType::Int8),
            Self::Int16 => Some(DataType::Int16),
            Self::Int32 => Some(DataType::Int32),
            Self::Int64 => Some(DataType::Int64),
            Self::Float32 => Some(DataType::Float32),
            Self::Float64 => Some(DataType::Float64),
            Self::Categorical => None,
            Self::Original(dtype) => Some(dtype.clone()),
        }
    }

    /// Smallest signed integer type holding `min..=max`.
    pub fn smallest_int(min: i64, max: i64) -> Self {
        let fits = |lo: i64, hi: i64| min >= lo && max <= hi;
        if fits(i8::MIN.into(), i8::MAX.into()) {
            Self::Int8
        } else if fits(i16::MIN.into(), i16::MAX.into()) {
            Self::Int16
        } else if fits(i32::MIN.into(), i32::MAX.into()) {
            Self::Int32
        } else {
            Self::Int64
        }
    }
}

impl fmt::Display for InferredDtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}
