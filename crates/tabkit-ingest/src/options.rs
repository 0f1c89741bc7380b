//! Reader options.
//!
//! One option set is shared by every reader. Each reader consumes the fields
//! that apply to its format and ignores the rest, so a single configuration
//! can be passed to [`read_file`](crate::read_file) regardless of extension.

use serde::{Deserialize, Serialize};

use crate::error::ReaderError;

/// Options forwarded to the format reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Maximum number of data rows to return. `None` reads everything.
    pub n_rows: Option<usize>,

    /// Whether the first row holds column names (CSV, Excel).
    /// Defaults to true.
    pub has_header: bool,

    /// Field separator (CSV). Must be ASCII. Defaults to `,`.
    pub separator: char,

    /// Rows to skip before the header (CSV, Excel).
    pub skip_rows: usize,

    /// Rows used for schema inference (CSV). Defaults to 100.
    pub infer_schema_length: Option<usize>,

    /// Worksheet to read (Excel). Defaults to the first sheet.
    pub sheet_name: Option<String>,

    /// Zero-based index of the `<table>` to read (HTML).
    pub table_index: usize,

    /// Read newline-delimited JSON instead of a JSON array.
    pub json_lines: bool,

    /// SQLite database path or `sqlite:` URL (SQL formats).
    pub connection: Option<String>,

    /// Table name (SQL table). Defaults to the file stem.
    pub table: Option<String>,

    /// Element name that marks a row (XML). Defaults to the children of the root.
    pub row_tag: Option<String>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            n_rows: None,
            has_header: true,
            separator: ',',
            skip_rows: 0,
            infer_schema_length: Some(100),
            sheet_name: None,
            table_index: 0,
            json_lines: false,
            connection: None,
            table: None,
            row_tag: None,
        }
    }
}

impl ReadOptions {
    /// Limit the number of rows read.
    #[must_use]
    pub fn with_n_rows(mut self, n_rows: Option<usize>) -> Self {
        self.n_rows = n_rows;
        self
    }

    #[must_use]
    pub fn with_has_header(mut self, has_header: bool) -> Self {
        self.has_header = has_header;
        self
    }

    #[must_use]
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_skip_rows(mut self, skip_rows: usize) -> Self {
        self.skip_rows = skip_rows;
        self
    }

    #[must_use]
    pub fn with_infer_schema_length(mut self, length: Option<usize>) -> Self {
        self.infer_schema_length = length;
        self
    }

    #[must_use]
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = Some(sheet_name.into());
        self
    }

    #[must_use]
    pub fn with_table_index(mut self, table_index: usize) -> Self {
        self.table_index = table_index;
        self
    }

    #[must_use]
    pub fn with_json_lines(mut self, json_lines: bool) -> Self {
        self.json_lines = json_lines;
        self
    }

    /// Set the SQLite database (path or `sqlite:` URL).
    #[must_use]
    pub fn with_connection(mut self, connection: impl Into<String>) -> Self {
        self.connection = Some(connection.into());
        self
    }

    #[must_use]
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    #[must_use]
    pub fn with_row_tag(mut self, row_tag: impl Into<String>) -> Self {
        self.row_tag = Some(row_tag.into());
        self
    }

    /// The separator as a single byte.
    pub(crate) fn separator_byte(&self) -> Result<u8, ReaderError> {
        if self.separator.is_ascii() {
            Ok(self.separator as u8)
        } else {
            Err(ReaderError::InvalidOption {
                option: "separator",
                reason: format!("'{}' is not an ASCII character", self.separator),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ReadOptions::default();
        assert!(options.has_header);
        assert_eq!(options.separator, ',');
        assert_eq!(options.infer_schema_length, Some(100));
        assert_eq!(options.n_rows, None);
    }

    #[test]
    fn test_builder() {
        let options = ReadOptions::default()
            .with_n_rows(Some(10))
            .with_separator(';')
            .with_sheet_name("Orders")
            .with_connection("sales.db");

        assert_eq!(options.n_rows, Some(10));
        assert_eq!(options.separator_byte().unwrap(), b';');
        assert_eq!(options.sheet_name.as_deref(), Some("Orders"));
        assert_eq!(options.connection.as_deref(), Some("sales.db"));
    }

    #[test]
    fn test_non_ascii_separator_rejected() {
        let options = ReadOptions::default().with_separator('§');
        assert!(matches!(
            options.separator_byte(),
            Err(ReaderError::InvalidOption {
                option: "separator",
                ..
            })
        ));
    }

    #[test]
    fn test_deserialize_partial() {
        let options: ReadOptions =
            serde_json::from_str(r#"{"n_rows": 5, "separator": "\t", "row_tag": "item"}"#)
                .unwrap();
        assert_eq!(options.n_rows, Some(5));
        assert_eq!(options.separator, '\t');
        assert_eq!(options.row_tag.as_deref(), Some("item"));
        assert!(options.has_header);
    }
}
