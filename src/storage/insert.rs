//! Row insertion.
//!
//! Every write path (file ingestion, bulk hires, restore) funnels through
//! `append_rows`, which inserts a whole batch inside one transaction: either
//! every row lands or none does.

use log::debug;
use sqlx::Connection;

use crate::error_handling::DatabaseError;
use crate::storage::models::{CellValue, HiredEmployee};
use crate::storage::schema::{quote_identifier, validate_identifier};
use crate::storage::Session;

/// Builds `INSERT INTO "t" ("a", "b") VALUES (?, ?)` for the given columns.
fn insert_statement(table: &str, columns: &[&str]) -> String {
    let column_list = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = vec!["?"; columns.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        column_list,
        placeholders
    )
}

/// Appends `rows` to `table` in a single transaction.
///
/// Each row must hold one value per entry of `columns`. Values are bound as
/// given; the store applies its own column affinity (so `Text("42")` lands as
/// the integer 42 in an `INTEGER` column).
///
/// Returns the number of rows written.
///
/// # Errors
///
/// Returns `DatabaseError::SqlError` with the store's message when any row is
/// rejected (duplicate key, NOT NULL, missing table or column, wrong arity).
/// The transaction is rolled back on every error path.
pub async fn append_rows(
    session: &mut Session,
    table: &str,
    columns: &[&str],
    rows: &[Vec<CellValue>],
) -> Result<usize, DatabaseError> {
    validate_identifier(table)?;
    let sql = insert_statement(table, columns);
    debug!("Appending {} rows: {}", rows.len(), sql);

    let mut tx = session.conn().begin().await?;

    for row in rows {
        let mut query = sqlx::query(&sql);
        for cell in row {
            query = match cell {
                CellValue::Integer(v) => query.bind(*v),
                CellValue::Text(v) => query.bind(v.as_str()),
                CellValue::Null => query.bind(Option::<String>::None),
            };
        }
        // Dropping `tx` on the early return rolls the batch back.
        query.execute(&mut *tx).await?;
    }

    tx.commit().await?;
    Ok(rows.len())
}

/// Inserts already-structured hire records as one batch.
///
/// No null substitution is applied; the records are written exactly as given.
pub async fn insert_hired(
    session: &mut Session,
    records: &[HiredEmployee],
) -> Result<usize, DatabaseError> {
    let rows: Vec<Vec<CellValue>> = records.iter().map(HiredEmployee::to_cells).collect();
    append_rows(
        session,
        "hired_employees",
        &["id", "name", "hired_at", "department_id", "job_id"],
        &rows,
    )
    .await
}
