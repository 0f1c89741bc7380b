//! SAS transport (XPORT version 5) reading.
//!
//! Only the first member of a library is loaded. Numeric variables become
//! `Float64` columns with SAS missing values as nulls; character variables
//! become `String` columns with trailing padding removed.

mod float;
mod header;

use std::fs;
use std::path::Path;

use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use thiserror::Error;
use tracing::debug;

use crate::error::ReaderError;
use crate::options::ReadOptions;

use float::{ibm_to_ieee, is_missing};
use header::{
    DSCRPTR_HEADER_PREFIX, LIBRARY_HEADER_PREFIX, MEMBER_HEADER_PREFIX, NAMESTR_HEADER_PREFIX,
    OBS_HEADER_PREFIX, RECORD_LEN, SasKind, SasVariable, align_to_record, expect_header,
    is_header, parse_dataset_label, parse_dataset_name, parse_namestr_len,
    parse_namestr_records, parse_variable_count, read_string,
};

/// Errors raised while decoding a transport file.
#[derive(Debug, Error)]
pub enum XptError {
    #[error("invalid transport file: {message}")]
    InvalidFormat { message: String },

    #[error("missing header: expected {expected}")]
    MissingHeader { expected: &'static str },

    #[error("invalid NAMESTR at index {index}: {message}")]
    InvalidNamestr { index: usize, message: String },

    #[error("failed to parse numeric field: {field}")]
    NumericParse { field: &'static str },

    #[error("record out of bounds at offset {offset}")]
    RecordOutOfBounds { offset: usize },

    #[error("observation length overflow")]
    ObservationOverflow,

    #[error("unexpected trailing bytes in observations")]
    TrailingBytes,
}

impl XptError {
    pub(crate) fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat {
            message: message.into(),
        }
    }
}

/// A decoded observation value.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SasValue {
    Num(Option<f64>),
    Char(String),
}

/// The first member of a transport library.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SasDataset {
    pub name: String,
    pub label: Option<String>,
    pub variables: Vec<SasVariable>,
    pub rows: Vec<Vec<SasValue>>,
}

/// Reads a transport file into a DataFrame named after its variables.
pub(crate) fn read(path: &Path, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let data = fs::read(path)?;
    let mut dataset = parse_xport(&data)?;
    if let Some(n) = options.n_rows {
        dataset.rows.truncate(n);
    }
    debug!(
        dataset = %dataset.name,
        variables = dataset.variables.len(),
        rows = dataset.rows.len(),
        "transport member loaded"
    );
    Ok(to_frame(&dataset)?)
}

fn read_record(data: &[u8], offset: usize) -> Result<&[u8], XptError> {
    data.get(offset..offset + RECORD_LEN)
        .ok_or(XptError::RecordOutOfBounds { offset })
}

pub(crate) fn parse_xport(data: &[u8]) -> Result<SasDataset, XptError> {
    if data.len() < RECORD_LEN * 8 {
        return Err(XptError::invalid_format("file too small"));
    }
    if !data.len().is_multiple_of(RECORD_LEN) {
        return Err(XptError::invalid_format(
            "file length is not a multiple of 80",
        ));
    }

    let mut offset = 0usize;
    expect_header(read_record(data, offset)?, LIBRARY_HEADER_PREFIX, "LIBRARY HEADER")?;
    // real and modified library headers carry timestamps only
    offset += RECORD_LEN * 3;

    let member_header = read_record(data, offset)?;
    expect_header(member_header, MEMBER_HEADER_PREFIX, "MEMBER HEADER")?;
    let namestr_len = parse_namestr_len(member_header)?;
    offset += RECORD_LEN;

    expect_header(read_record(data, offset)?, DSCRPTR_HEADER_PREFIX, "DSCRPTR HEADER")?;
    offset += RECORD_LEN;

    let name = parse_dataset_name(read_record(data, offset)?)?;
    offset += RECORD_LEN;
    let label = parse_dataset_label(read_record(data, offset)?);
    offset += RECORD_LEN;

    let namestr_header = read_record(data, offset)?;
    expect_header(namestr_header, NAMESTR_HEADER_PREFIX, "NAMESTR HEADER")?;
    let var_count = parse_variable_count(namestr_header)?;
    offset += RECORD_LEN;

    let namestr_total = var_count
        .checked_mul(namestr_len)
        .ok_or(XptError::ObservationOverflow)?;
    let namestr_data = data
        .get(offset..offset + namestr_total)
        .ok_or(XptError::RecordOutOfBounds { offset })?;
    let variables = parse_namestr_records(namestr_data, var_count, namestr_len)?;
    offset = align_to_record(offset + namestr_total);

    expect_header(read_record(data, offset)?, OBS_HEADER_PREFIX, "OBS HEADER")?;
    offset += RECORD_LEN;

    let obs_len = variables.iter().try_fold(0usize, |total, variable| {
        total
            .checked_add(variable.length)
            .ok_or(XptError::ObservationOverflow)
    })?;
    let end = member_end(data, offset);
    let rows = parse_observations(&data[offset..end], obs_len, &variables)?;

    Ok(SasDataset {
        name,
        label,
        variables,
        rows,
    })
}

/// Offset where the next member starts, or the end of the file.
fn member_end(data: &[u8], start: usize) -> usize {
    (start..data.len())
        .step_by(RECORD_LEN)
        .find(|&offset| is_header(&data[offset..], MEMBER_HEADER_PREFIX))
        .unwrap_or(data.len())
}

fn parse_observations(
    data: &[u8],
    obs_len: usize,
    variables: &[SasVariable],
) -> Result<Vec<Vec<SasValue>>, XptError> {
    if obs_len == 0 {
        return Ok(Vec::new());
    }

    let mut rows_total = data.len() / obs_len;
    let remainder = &data[rows_total * obs_len..];
    if remainder.iter().any(|&b| b != b' ') {
        return Err(XptError::TrailingBytes);
    }

    // record padding can look like whole blank observations
    while rows_total > 0 {
        let start = (rows_total - 1) * obs_len;
        if data[start..start + obs_len].iter().all(|&b| b == b' ') {
            rows_total -= 1;
        } else {
            break;
        }
    }

    Ok(data[..rows_total * obs_len]
        .chunks_exact(obs_len)
        .map(|row| parse_row(row, variables))
        .collect())
}

fn parse_row(row: &[u8], variables: &[SasVariable]) -> Vec<SasValue> {
    let mut pos = 0usize;
    variables
        .iter()
        .map(|variable| {
            let slice = &row[pos..pos + variable.length];
            pos += variable.length;
            match variable.kind {
                SasKind::Character => SasValue::Char(read_string(slice, 0, slice.len())),
                SasKind::Numeric => SasValue::Num(decode_numeric(slice)),
            }
        })
        .collect()
}

fn decode_numeric(bytes: &[u8]) -> Option<f64> {
    if is_missing(bytes) {
        return None;
    }
    // short numerics are truncated on the right
    let mut buf = [0u8; 8];
    let len = bytes.len().min(8);
    buf[..len].copy_from_slice(&bytes[..len]);
    Some(ibm_to_ieee(buf))
}

fn to_frame(dataset: &SasDataset) -> polars::prelude::PolarsResult<DataFrame> {
    let columns: Vec<Column> = dataset
        .variables
        .iter()
        .enumerate()
        .map(|(idx, variable)| {
            let name = variable.name.as_str().into();
            let series = match variable.kind {
                SasKind::Numeric => {
                    let values: Vec<Option<f64>> = dataset
                        .rows
                        .iter()
                        .map(|row| match row.get(idx) {
                            Some(SasValue::Num(value)) => *value,
                            _ => None,
                        })
                        .collect();
                    Series::new(name, values)
                }
                SasKind::Character => {
                    let values: Vec<Option<String>> = dataset
                        .rows
                        .iter()
                        .map(|row| match row.get(idx) {
                            Some(SasValue::Char(value)) => Some(value.clone()),
                            _ => None,
                        })
                        .collect();
                    Series::new(name, values)
                }
            };
            series.into_column()
        })
        .collect();
    DataFrame::new(columns)
}
