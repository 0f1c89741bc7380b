//! The extension-to-format table.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A file format the dispatcher knows how to route.
///
/// Every variant corresponds to exactly one file extension (see
/// [`FileFormat::extension`]). Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileFormat {
    /// Comma-separated text.
    Csv,
    /// Spreadsheet workbook.
    Excel,
    Json,
    /// First (or selected) `<table>` of an HTML document.
    Html,
    /// File holds a SQL statement.
    Sql,
    /// File names a SQL table.
    SqlTable,
    /// File holds a SQL query.
    SqlQuery,
    Parquet,
    Orc,
    Stata,
    /// SAS transport (XPORT) file.
    Sas,
    Pickle,
    Clipboard,
    Hdf,
    Feather,
    /// Cloud-warehouse query.
    BigQuery,
    Xml,
}

impl FileFormat {
    /// All formats in table order.
    pub const ALL: [FileFormat; 17] = [
        FileFormat::Csv,
        FileFormat::Excel,
        FileFormat::Json,
        FileFormat::Html,
        FileFormat::Sql,
        FileFormat::SqlTable,
        FileFormat::SqlQuery,
        FileFormat::Parquet,
        FileFormat::Orc,
        FileFormat::Stata,
        FileFormat::Sas,
        FileFormat::Pickle,
        FileFormat::Clipboard,
        FileFormat::Hdf,
        FileFormat::Feather,
        FileFormat::BigQuery,
        FileFormat::Xml,
    ];

    /// The extension (with leading dot) that selects this format.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => ".csv",
            Self::Excel => ".xlsx",
            Self::Json => ".json",
            Self::Html => ".html",
            Self::Sql => ".sql",
            Self::SqlTable => ".sql_table",
            Self::SqlQuery => ".sql_query",
            Self::Parquet => ".parquet",
            Self::Orc => ".orc",
            Self::Stata => ".stata",
            Self::Sas => ".sas",
            Self::Pickle => ".pickle",
            Self::Clipboard => ".clipboard",
            Self::Hdf => ".hdf",
            Self::Feather => ".feather",
            Self::BigQuery => ".gbq",
            Self::Xml => ".xml",
        }
    }

    /// Look up a format by extension, including the leading dot.
    pub fn from_extension(extension: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|format| format.extension() == extension)
    }

    /// Whether a reader backend exists for this format.
    pub const fn has_backend(self) -> bool {
        !matches!(
            self,
            Self::Orc | Self::Stata | Self::Pickle | Self::Clipboard | Self::Hdf | Self::BigQuery
        )
    }

    /// Human-readable name used in messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Csv => "CSV",
            Self::Excel => "Excel",
            Self::Json => "JSON",
            Self::Html => "HTML",
            Self::Sql => "SQL",
            Self::SqlTable => "SQL table",
            Self::SqlQuery => "SQL query",
            Self::Parquet => "Parquet",
            Self::Orc => "ORC",
            Self::Stata => "Stata",
            Self::Sas => "SAS",
            Self::Pickle => "pickle",
            Self::Clipboard => "clipboard",
            Self::Hdf => "HDF5",
            Self::Feather => "Feather",
            Self::BigQuery => "BigQuery",
            Self::Xml => "XML",
        }
    }
}

impl fmt::Display for FileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions_are_unique() {
        for (idx, format) in FileFormat::ALL.iter().enumerate() {
            for other in &FileFormat::ALL[idx + 1..] {
                assert_ne!(format.extension(), other.extension());
            }
        }
    }

    #[test]
    fn test_from_extension_round_trips_table() {
        for format in FileFormat::ALL {
            assert_eq!(FileFormat::from_extension(format.extension()), Some(format));
        }
    }

    #[test]
    fn test_from_extension_is_case_sensitive() {
        assert_eq!(FileFormat::from_extension(".CSV"), None);
        assert_eq!(FileFormat::from_extension("csv"), None);
        assert_eq!(FileFormat::from_extension(""), None);
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&FileFormat::SqlTable).unwrap();
        assert_eq!(json, "\"sql_table\"");
        let parsed: FileFormat = serde_json::from_str("\"big_query\"").unwrap();
        assert_eq!(parsed, FileFormat::BigQuery);
    }
}
