//! SQL formats, backed by a SQLite database through sqlx.
//!
//! `.sql` and `.sql_query` files hold the statement to run. `.sql_table`
//! selects every row of a table named by the `table` option or, failing that,
//! the file stem. The database comes from the `connection` option and is
//! opened read-only.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use futures::TryStreamExt;
use polars::prelude::DataFrame;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{Column, ConnectOptions, Executor, Row, Statement, TypeInfo, ValueRef};
use tracing::debug;

use crate::error::ReaderError;
use crate::frame_builder::{build_frame, Cell};
use crate::options::ReadOptions;

use super::limit_reached;

/// Runs the statement stored in the file.
pub(crate) fn read_query(path: &Path, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let statement = fs::read_to_string(path)?;
    let statement = statement.trim();
    if statement.is_empty() {
        return Err(ReaderError::InvalidOption {
            option: "query",
            reason: format!("{} contains no SQL statement", path.display()),
        });
    }
    run(statement, options)
}

/// Selects the whole table named by the options or the file stem.
pub(crate) fn read_table(path: &Path, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let table = match &options.table {
        Some(table) => table.clone(),
        None => path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .ok_or(ReaderError::MissingOption { option: "table" })?,
    };
    run(&select_all(&table), options)
}

fn select_all(table: &str) -> String {
    format!("SELECT * FROM \"{}\"", table.replace('"', "\"\""))
}

fn connect_options(connection: &str) -> Result<SqliteConnectOptions, ReaderError> {
    let options = if connection.starts_with("sqlite:") {
        SqliteConnectOptions::from_str(connection)?
    } else {
        SqliteConnectOptions::new().filename(connection)
    };
    Ok(options.read_only(true))
}

fn run(statement: &str, options: &ReadOptions) -> Result<DataFrame, ReaderError> {
    let connection = options
        .connection
        .as_deref()
        .ok_or(ReaderError::MissingOption {
            option: "connection",
        })?;
    let connect = connect_options(connection)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let (headers, rows) = runtime.block_on(fetch(connect, statement, options.n_rows))?;

    debug!(
        columns = headers.len(),
        rows = rows.len(),
        "SQL statement returned"
    );
    Ok(build_frame(headers, rows)?)
}

async fn fetch(
    connect: SqliteConnectOptions,
    statement: &str,
    n_rows: Option<usize>,
) -> Result<(Vec<String>, Vec<Vec<Cell>>), sqlx::Error> {
    let mut conn: SqliteConnection = connect.connect().await?;
    // Headers come from the statement, not the rows; empty results keep them.
    let prepared = (&mut conn).prepare(statement).await?;
    let headers: Vec<String> = prepared
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();
    let mut rows: Vec<Vec<Cell>> = Vec::new();

    let mut stream = prepared.query().fetch(&mut conn);
    while !limit_reached(rows.len(), n_rows) {
        let Some(row) = stream.try_next().await? else {
            break;
        };
        let cells = (0..row.len())
            .map(|idx| decode_cell(&row, idx))
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(cells);
    }

    Ok((headers, rows))
}

/// SQLite is dynamically typed, so each value is decoded by its storage class.
fn decode_cell(row: &SqliteRow, idx: usize) -> Result<Cell, sqlx::Error> {
    let raw = row.try_get_raw(idx)?;
    if raw.is_null() {
        return Ok(Cell::Null);
    }
    let storage = raw.type_info().name().to_string();
    let cell = match storage.as_str() {
        "INTEGER" => Cell::Int(row.try_get::<i64, _>(idx)?),
        "REAL" => Cell::Float(row.try_get::<f64, _>(idx)?),
        "BLOB" => {
            let bytes: Vec<u8> = row.try_get(idx)?;
            Cell::Text(format!("<{} bytes>", bytes.len()))
        }
        _ => Cell::Text(row.try_get::<String, _>(idx)?),
    };
    Ok(cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_quotes_identifier() {
        assert_eq!(select_all("orders"), "SELECT * FROM \"orders\"");
        assert_eq!(select_all("we\"ird"), "SELECT * FROM \"we\"\"ird\"");
    }

    #[test]
    fn test_missing_connection() {
        let result = run("SELECT 1", &ReadOptions::default());
        assert!(matches!(
            result,
            Err(ReaderError::MissingOption {
                option: "connection"
            })
        ));
    }
}
