//! Workbook reading through calamine.

use std::path::Path;

use calamine::{open_workbook, Data, Reader, Xlsx};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use polars::prelude::DataFrame;
use tracing::debug;

use crate::error::ReaderError;
use crate::frame_builder::{build_frame, header_name, Cell};
use crate::options::ReadOptions;

use super::limit_reached;

/// Reads one worksheet: `sheet_name` when set, otherwise the first sheet.
pub(crate) fn read(path: &Path, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| ReaderError::Excel {
        message: format!("failed to open workbook: {e}"),
    })?;

    let range = match &options.sheet_name {
        Some(name) => workbook
            .worksheet_range(name)
            .map_err(|e| ReaderError::Excel {
                message: format!("failed to read sheet '{name}': {e}"),
            })?,
        None => workbook
            .worksheet_range_at(0)
            .ok_or_else(|| ReaderError::Excel {
                message: "workbook has no worksheets".to_string(),
            })?
            .map_err(|e| ReaderError::Excel {
                message: format!("failed to read first sheet: {e}"),
            })?,
    };

    let mut rows = range.rows().skip(options.skip_rows);
    let headers: Vec<String> = if options.has_header {
        rows.next()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(idx, cell)| header_name(&cell.to_string(), idx))
                    .collect()
            })
            .unwrap_or_default()
    } else {
        (0..range.width()).map(|idx| header_name("", idx)).collect()
    };

    let mut data = Vec::new();
    for row in rows {
        if limit_reached(data.len(), options.n_rows) {
            break;
        }
        data.push(row.iter().map(to_cell).collect());
    }

    debug!(
        columns = headers.len(),
        rows = data.len(),
        "worksheet loaded"
    );
    Ok(build_frame(headers, data)?)
}

/// Integral floats come back as integers; workbooks store all numbers as doubles.
/// Date-formatted cells become datetimes. Durations stay as fractional days.
fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Null,
        Data::Int(v) => Cell::Int(*v),
        Data::Float(v) if v.fract() == 0.0 && v.abs() < i64::MAX as f64 => Cell::Int(*v as i64),
        Data::Float(v) => Cell::Float(*v),
        Data::Bool(v) => Cell::Bool(*v),
        Data::String(s) if s.trim().is_empty() => Cell::Null,
        Data::String(s) => Cell::Text(s.clone()),
        Data::DateTime(dt) if dt.is_datetime() => dt
            .as_datetime()
            .map_or_else(|| Cell::Float(dt.as_f64()), Cell::Datetime),
        Data::DateTime(dt) => Cell::Float(dt.as_f64()),
        Data::DateTimeIso(s) => parse_iso(s).map_or_else(|| Cell::Text(s.clone()), Cell::Datetime),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
    }
}

fn parse_iso(value: &str) -> Option<NaiveDateTime> {
    value
        .parse::<NaiveDateTime>()
        .ok()
        .or_else(|| {
            value
                .parse::<NaiveDate>()
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cell() {
        assert_eq!(to_cell(&Data::Float(3.0)), Cell::Int(3));
        assert_eq!(to_cell(&Data::Float(2.5)), Cell::Float(2.5));
        assert_eq!(to_cell(&Data::Empty), Cell::Null);
        assert_eq!(to_cell(&Data::String("  ".into())), Cell::Null);
        assert_eq!(
            to_cell(&Data::String("Widget".into())),
            Cell::Text("Widget".into())
        );
    }

    #[test]
    fn test_iso_dates() {
        let noon = NaiveDate::from_ymd_opt(2024, 2, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_eq!(
            to_cell(&Data::DateTimeIso("2024-02-01T12:00:00".into())),
            Cell::Datetime(noon)
        );
        assert_eq!(
            to_cell(&Data::DateTimeIso("2024-02-01".into())),
            Cell::Datetime(noon.date().and_time(NaiveTime::MIN))
        );
        assert_eq!(
            to_cell(&Data::DateTimeIso("sometime".into())),
            Cell::Text("sometime".into())
        );
        assert_eq!(
            to_cell(&Data::DurationIso("PT1H".into())),
            Cell::Text("PT1H".into())
        );
    }

    #[test]
    fn test_read_missing_workbook() {
        let result = read(
            Path::new("/nonexistent/tabkit/book.xlsx"),
            &ReadOptions::default(),
        );
        assert!(matches!(result, Err(ReaderError::Excel { .. })));
    }
}
