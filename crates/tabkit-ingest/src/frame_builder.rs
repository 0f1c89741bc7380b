//! DataFrame construction from loosely typed cells.
//!
//! Readers whose backends hand back untyped values (HTML, XML, SQLite,
//! workbooks, SAS transport) collect [`Cell`]s row by row and let
//! [`build_frame`] settle on one dtype per column.

use chrono::NaiveDateTime;
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, PolarsResult, Series};

/// A single value before its column dtype is known.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Cell {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Datetime(NaiveDateTime),
    Text(String),
}

impl Cell {
    /// Type a textual value: empty is null, then integer, float, boolean, text.
    pub(crate) fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Self::Null;
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return Self::Int(value);
        }
        if let Ok(value) = trimmed.parse::<f64>() {
            return Self::Float(value);
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return Self::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return Self::Bool(false);
        }
        Self::Text(trimmed.to_string())
    }

    fn render(&self) -> Option<String> {
        match self {
            Self::Null => None,
            Self::Int(v) => Some(v.to_string()),
            Self::Float(v) => Some(format_numeric(*v)),
            Self::Bool(v) => Some(v.to_string()),
            Self::Datetime(v) => Some(v.format("%Y-%m-%d %H:%M:%S").to_string()),
            Self::Text(s) => Some(s.clone()),
        }
    }
}

/// Dtype a column settles on after seeing all its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Empty,
    Int,
    Float,
    Bool,
    Datetime,
    Text,
}

impl ColumnKind {
    fn merge(self, cell: &Cell) -> Self {
        match (self, cell) {
            (kind, Cell::Null) => kind,
            (Self::Text, _) | (_, Cell::Text(_)) => Self::Text,
            (Self::Empty | Self::Int, Cell::Int(_)) => Self::Int,
            (Self::Empty | Self::Int | Self::Float, Cell::Float(_)) | (Self::Float, Cell::Int(_)) => {
                Self::Float
            }
            (Self::Empty | Self::Bool, Cell::Bool(_)) => Self::Bool,
            (Self::Empty | Self::Datetime, Cell::Datetime(_)) => Self::Datetime,
            _ => Self::Text,
        }
    }
}

/// Formats a floating-point number without trailing zeros.
pub(crate) fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else if s.contains('.') {
        trimmed.to_string()
    } else {
        s
    }
}

/// Column name for a header cell, falling back to `column_{idx}` when blank.
pub(crate) fn header_name(raw: &str, idx: usize) -> String {
    if raw.trim().is_empty() {
        format!("column_{idx}")
    } else {
        raw.to_string()
    }
}

/// Build a DataFrame from header names and rows of cells.
///
/// Short rows are padded with nulls; cells beyond the header width are dropped.
pub(crate) fn build_frame(headers: Vec<String>, rows: Vec<Vec<Cell>>) -> PolarsResult<DataFrame> {
    let mut columns: Vec<Column> = Vec::with_capacity(headers.len());
    for (idx, header) in headers.iter().enumerate() {
        let name = header_name(header, idx);
        let cells: Vec<&Cell> = rows
            .iter()
            .map(|row| row.get(idx).unwrap_or(&Cell::Null))
            .collect();
        let kind = cells
            .iter()
            .fold(ColumnKind::Empty, |kind, cell| kind.merge(cell));
        columns.push(build_series(&name, kind, &cells).into_column());
    }
    DataFrame::new(columns)
}

fn build_series(name: &str, kind: ColumnKind, cells: &[&Cell]) -> Series {
    match kind {
        ColumnKind::Int => {
            let values: Vec<Option<i64>> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Int(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Float => {
            let values: Vec<Option<f64>> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Int(v) => Some(*v as f64),
                    Cell::Float(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Bool => {
            let values: Vec<Option<bool>> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Bool(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Datetime => {
            let values: Vec<Option<NaiveDateTime>> = cells
                .iter()
                .map(|cell| match cell {
                    Cell::Datetime(v) => Some(*v),
                    _ => None,
                })
                .collect();
            Series::new(name.into(), values)
        }
        ColumnKind::Empty | ColumnKind::Text => {
            let values: Vec<Option<String>> = cells.iter().map(|cell| cell.render()).collect();
            Series::new(name.into(), values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::DataType;

    #[test]
    fn test_cell_parse() {
        assert_eq!(Cell::parse("  "), Cell::Null);
        assert_eq!(Cell::parse("42"), Cell::Int(42));
        assert_eq!(Cell::parse("-1.5"), Cell::Float(-1.5));
        assert_eq!(Cell::parse("TRUE"), Cell::Bool(true));
        assert_eq!(Cell::parse(" north "), Cell::Text("north".to_string()));
    }

    #[test]
    fn test_format_numeric() {
        assert_eq!(format_numeric(1.0), "1");
        assert_eq!(format_numeric(1.5), "1.5");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(100.0), "100");
    }

    #[test]
    fn test_column_kinds() {
        let headers = vec!["int".into(), "mixed".into(), "flag".into(), "text".into()];
        let rows = vec![
            vec![Cell::Int(1), Cell::Int(1), Cell::Bool(true), Cell::Int(7)],
            vec![Cell::Null, Cell::Float(2.5), Cell::Bool(false), Cell::Text("x".into())],
        ];
        let df = build_frame(headers, rows).unwrap();

        assert_eq!(df.column("int").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("mixed").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("flag").unwrap().dtype(), &DataType::Boolean);
        assert_eq!(df.column("text").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("int").unwrap().null_count(), 1);
    }

    #[test]
    fn test_datetime_columns() {
        let noon = NaiveDateTime::parse_from_str("2024-02-01 12:00:00", "%Y-%m-%d %H:%M:%S").unwrap();
        let headers = vec!["when".into(), "mixed".into()];
        let rows = vec![
            vec![Cell::Datetime(noon), Cell::Datetime(noon)],
            vec![Cell::Null, Cell::Int(4)],
        ];
        let df = build_frame(headers, rows).unwrap();

        assert!(matches!(df.column("when").unwrap().dtype(), DataType::Datetime(_, None)));
        assert_eq!(df.column("when").unwrap().null_count(), 1);
        let mixed = df.column("mixed").unwrap().str().unwrap().get(0);
        assert_eq!(mixed, Some("2024-02-01 12:00:00"));
    }

    #[test]
    fn test_blank_headers_and_short_rows() {
        let headers = vec!["a".into(), " ".into()];
        let rows = vec![vec![Cell::Int(1)], vec![Cell::Int(2), Cell::Text("z".into())]];
        let df = build_frame(headers, rows).unwrap();

        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect();
        assert_eq!(names, vec!["a", "column_1"]);
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("column_1").unwrap().null_count(), 1);
    }
}
