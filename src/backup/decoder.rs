//! Table restore.

use std::collections::HashSet;
use std::path::Path;

use log::{info, warn};
use serde::Serialize;

use crate::backup::container::{read_container, DecodedContainer};
use crate::config::container_path;
use crate::error_handling::BackupError;
use crate::storage::{append_rows, validate_identifier, CellValue, Session};

/// Outcome of a successful restore.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RestoreSummary {
    pub table: String,
    pub rows_restored: usize,
}

/// Converts decoded records into insertable rows.
///
/// Values pass through as text for the store to coerce. The one exception is
/// an empty string in a column the header marks nullable: it is restored as
/// NULL, since that is how the encoder renders NULL.
fn to_rows(container: &DecodedContainer) -> Vec<Vec<CellValue>> {
    let nullable: HashSet<&str> = container
        .columns
        .iter()
        .flatten()
        .filter(|c| c.nullable())
        .map(|c| c.name.as_str())
        .collect();

    container
        .records
        .iter()
        .map(|record| {
            record
                .fields()
                .iter()
                .map(|(column, value)| {
                    if value.is_empty() && nullable.contains(column.as_str()) {
                        CellValue::Null
                    } else {
                        CellValue::Text(value.clone())
                    }
                })
                .collect()
        })
        .collect()
}

/// Re-inserts the rows of `table`'s container into `table`.
///
/// Rows are appended in the order they were written, in one transaction.
/// The column list is taken from the first record; every record in a
/// container shares the writer schema, so the others are not re-checked.
///
/// # Errors
///
/// - `Database` for an invalid table name
/// - `ContainerNotFound` / `EmptyContainer` when there is nothing to restore
/// - `Container` when the file cannot be decoded (including truncation)
/// - `Restore` when the store rejects the rows (nothing is written)
pub async fn restore(
    session: &mut Session,
    table: &str,
    backup_dir: &Path,
) -> Result<RestoreSummary, BackupError> {
    validate_identifier(table)?;

    let path = container_path(backup_dir, table);
    if !path.exists() {
        return Err(BackupError::ContainerNotFound {
            table: table.to_string(),
            path,
        });
    }

    let container = read_container(&path)?;
    let first = container
        .records
        .first()
        .ok_or_else(|| BackupError::EmptyContainer(table.to_string()))?;

    if let Some(recorded) = container.table.as_deref() {
        if recorded != table {
            warn!(
                "Container {} was written for table {}, restoring into {}",
                path.display(),
                recorded,
                table
            );
        }
    }

    let columns: Vec<&str> = first.columns().collect();
    let rows = to_rows(&container);
    let rows_restored = append_rows(session, table, &columns, &rows)
        .await
        .map_err(|source| BackupError::Restore {
            table: table.to_string(),
            source,
        })?;

    info!(
        "Restored {} rows into {} from {}",
        rows_restored,
        table,
        path.display()
    );

    Ok(RestoreSummary {
        table: table.to_string(),
        rows_restored,
    })
}
