//! Table backup.

use std::path::{Path, PathBuf};

use log::info;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, TypeInfo, ValueRef};

use crate::backup::container::{write_container, ContainerSchema};
use crate::config::container_path;
use crate::error_handling::{BackupError, ContainerError, DatabaseError};
use crate::storage::{describe_table, quote_identifier, Session, TableDescription};

/// Outcome of a successful backup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackupSummary {
    pub table: String,
    pub record_count: usize,
    pub container_path: PathBuf,
}

/// Renders one stored value as a string.
///
/// NULL becomes the empty string; integers and reals use their decimal form.
fn cell_to_string(row: &SqliteRow, index: usize) -> Result<String, sqlx::Error> {
    let raw = row.try_get_raw(index)?;
    if raw.is_null() {
        return Ok(String::new());
    }
    let storage_class = raw.type_info().name().to_string();
    match storage_class.as_str() {
        "INTEGER" => Ok(row.try_get::<i64, _>(index)?.to_string()),
        "REAL" => Ok(row.try_get::<f64, _>(index)?.to_string()),
        "BLOB" => Ok(String::from_utf8_lossy(&row.try_get::<Vec<u8>, _>(index)?).into_owned()),
        _ => row.try_get::<String, _>(index),
    }
}

/// Reads every row of the described table, each value coerced to a string.
async fn fetch_rows_as_strings(
    session: &mut Session,
    description: &TableDescription,
) -> Result<Vec<Vec<String>>, DatabaseError> {
    let columns = description
        .column_names()
        .into_iter()
        .map(quote_identifier)
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "SELECT {} FROM {}",
        columns,
        quote_identifier(&description.table)
    );

    let rows = sqlx::query(&sql).fetch_all(session.conn()).await?;
    let values = rows
        .iter()
        .map(|row| {
            (0..row.len())
                .map(|index| cell_to_string(row, index))
                .collect::<Result<Vec<_>, _>>()
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(values)
}

/// Writes every row of `table` to its container under `backup_dir`.
///
/// The container schema comes from the table description, taken once before
/// any row is read. An existing container for the table is overwritten.
///
/// # Errors
///
/// - `Database` for an invalid or unknown table, or a failed read
/// - `EmptyTable` when the table has no rows (no container is written)
/// - `Container` when the file cannot be created or encoded
pub async fn backup(
    session: &mut Session,
    table: &str,
    backup_dir: &Path,
) -> Result<BackupSummary, BackupError> {
    let description = describe_table(session, table).await?;
    let schema = ContainerSchema::from_description(&description)?;

    let rows = fetch_rows_as_strings(session, &description).await?;
    if rows.is_empty() {
        return Err(BackupError::EmptyTable(table.to_string()));
    }

    std::fs::create_dir_all(backup_dir).map_err(ContainerError::from)?;
    let path = container_path(backup_dir, table);
    let record_count = write_container(&path, &schema, &rows)?;
    info!(
        "Backed up {} rows of {} to {}",
        record_count,
        table,
        path.display()
    );

    Ok(BackupSummary {
        table: table.to_string(),
        record_count,
        container_path: path,
    })
}
