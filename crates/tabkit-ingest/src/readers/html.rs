//! HTML table reading through scraper.

use std::fs;
use std::path::Path;

use polars::prelude::DataFrame;
use scraper::{ElementRef, Html, Selector};

use crate::error::ReaderError;
use crate::frame_builder::{build_frame, Cell};
use crate::options::ReadOptions;

use super::limit_reached;

/// Reads the `<table>` at `table_index` in document order.
///
/// A first row made of `<th>` cells supplies the column names; otherwise
/// columns are numbered from `"0"`.
pub(crate) fn read(path: &Path, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let contents = fs::read_to_string(path)?;
    parse_table(&contents, options)
}

fn selector(css: &str) -> Result<Selector, ReaderError> {
    Selector::parse(css).map_err(|e| ReaderError::Html {
        message: format!("invalid selector '{css}': {e}"),
    })
}

pub(crate) fn parse_table(contents: &str, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let document = Html::parse_document(contents);
    let table_sel = selector("table")?;
    let row_sel = selector("tr")?;
    let header_sel = selector("th")?;
    let cell_sel = selector("th, td")?;

    let table = document
        .select(&table_sel)
        .nth(options.table_index)
        .ok_or_else(|| ReaderError::Html {
            message: format!("no table at index {}", options.table_index),
        })?;

    let mut rows = table.select(&row_sel).peekable();
    let mut headers: Vec<String> = Vec::new();
    if let Some(first) = rows.peek()
        && first.select(&header_sel).next().is_some()
    {
        headers = first.select(&cell_sel).map(cell_text).collect();
        rows.next();
    }

    let mut data: Vec<Vec<Cell>> = Vec::new();
    for row in rows {
        if limit_reached(data.len(), options.n_rows) {
            break;
        }
        let cells: Vec<Cell> = row
            .select(&cell_sel)
            .map(|cell| Cell::parse(&cell_text(cell)))
            .collect();
        if !cells.is_empty() {
            data.push(cells);
        }
    }

    let width = data.iter().map(Vec::len).max().unwrap_or(0);
    while headers.len() < width {
        headers.push(headers.len().to_string());
    }

    Ok(build_frame(headers, data)?)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}
