//! XML reading through quick-xml.
//!
//! Rows are either the children of the document root or, when `row_tag` is
//! set, every element with that local name. A row's attributes and the text
//! of its direct child elements become fields; columns appear in the order
//! they are first seen.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use polars::prelude::DataFrame;
use quick_xml::Reader;
use quick_xml::escape::resolve_predefined_entity;
use quick_xml::events::{BytesRef, BytesStart, Event};

use crate::error::ReaderError;
use crate::frame_builder::{build_frame, Cell};
use crate::options::ReadOptions;

use super::limit_reached;

pub(crate) fn read(path: &Path, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let contents = fs::read_to_string(path)?;
    parse_document(&contents, options)
}

#[derive(Default)]
struct RowCollector {
    columns: Vec<String>,
    index: HashMap<String, usize>,
    rows: Vec<Vec<Cell>>,
}

impl RowCollector {
    fn column(&mut self, name: &str) -> usize {
        if let Some(&idx) = self.index.get(name) {
            return idx;
        }
        let idx = self.columns.len();
        self.columns.push(name.to_string());
        self.index.insert(name.to_string(), idx);
        idx
    }

    fn set(cells: &mut Vec<Cell>, idx: usize, cell: Cell) {
        if cells.len() <= idx {
            cells.resize(idx + 1, Cell::Null);
        }
        cells[idx] = cell;
    }

    fn start_row(&mut self, element: &BytesStart<'_>) -> Result<Vec<Cell>, ReaderError> {
        let mut cells = Vec::new();
        for attr in element.attributes() {
            let attr = attr.map_err(|e| xml_error(&e))?;
            let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|e| xml_error(&e))?;
            let idx = self.column(&name);
            Self::set(&mut cells, idx, Cell::parse(&value));
        }
        Ok(cells)
    }
}

fn xml_error(err: &impl std::fmt::Display) -> ReaderError {
    ReaderError::Xml {
        message: err.to_string(),
    }
}

fn local_name(element: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(element.local_name().as_ref()).into_owned()
}

fn resolve_reference(reference: &BytesRef<'_>) -> Result<String, ReaderError> {
    let name = String::from_utf8_lossy(reference);
    if let Some(code) = name.strip_prefix('#') {
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        return value
            .and_then(char::from_u32)
            .map(String::from)
            .ok_or_else(|| ReaderError::Xml {
                message: format!("invalid character reference '&{name};'"),
            });
    }
    resolve_predefined_entity(&name)
        .map(str::to_string)
        .ok_or_else(|| ReaderError::Xml {
            message: format!("unknown entity '&{name};'"),
        })
}

pub(crate) fn parse_document(
    contents: &str,
    options: &ReadOptions,
) -> Result<DataFrame, ReaderError> {
    let is_row = |element: &BytesStart<'_>, depth: usize| match &options.row_tag {
        Some(tag) => local_name(element) == *tag,
        None => depth == 2,
    };

    let mut reader = Reader::from_str(contents);
    let mut collector = RowCollector::default();
    let mut depth = 0usize;
    // (depth of the row element, cells gathered so far)
    let mut row: Option<(usize, Vec<Cell>)> = None;
    // (column index, accumulated text) of the child element being read
    let mut field: Option<(usize, String)> = None;

    loop {
        match reader.read_event().map_err(|e| xml_error(&e))? {
            Event::Start(element) => {
                depth += 1;
                match row.as_ref().map(|(row_depth, _)| *row_depth) {
                    None if is_row(&element, depth) => {
                        if limit_reached(collector.rows.len(), options.n_rows) {
                            break;
                        }
                        row = Some((depth, collector.start_row(&element)?));
                    }
                    Some(row_depth) if depth == row_depth + 1 => {
                        field = Some((collector.column(&local_name(&element)), String::new()));
                    }
                    _ => {}
                }
            }
            Event::Empty(element) => match &mut row {
                None if is_row(&element, depth + 1) => {
                    if limit_reached(collector.rows.len(), options.n_rows) {
                        break;
                    }
                    let cells = collector.start_row(&element)?;
                    collector.rows.push(cells);
                }
                Some((row_depth, cells)) if depth == *row_depth => {
                    let idx = collector.column(&local_name(&element));
                    RowCollector::set(cells, idx, Cell::Null);
                }
                _ => {}
            },
            Event::Text(text) => {
                if let Some((_, buf)) = &mut field {
                    buf.push_str(&String::from_utf8_lossy(&text));
                }
            }
            Event::CData(data) => {
                if let Some((_, buf)) = &mut field {
                    buf.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::GeneralRef(reference) => {
                if let Some((_, buf)) = &mut field {
                    buf.push_str(&resolve_reference(&reference)?);
                }
            }
            Event::End(_) => {
                if let Some(row_depth) = row.as_ref().map(|(row_depth, _)| *row_depth) {
                    if depth == row_depth + 1 {
                        if let (Some((idx, text)), Some((_, cells))) = (field.take(), row.as_mut()) {
                            RowCollector::set(cells, idx, Cell::parse(&text));
                        }
                    } else if depth == row_depth
                        && let Some((_, cells)) = row.take()
                    {
                        collector.rows.push(cells);
                    }
                }
                depth = depth.saturating_sub(1);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(build_frame(collector.columns, collector.rows)?)
}
