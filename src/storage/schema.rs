//! Table creation and description.

use log::debug;
use sqlx::Row;

use crate::error_handling::DatabaseError;
use crate::storage::models::{ColumnDescription, TableDescription};
use crate::storage::Session;

const CREATE_DEPARTMENTS: &str = "CREATE TABLE IF NOT EXISTS departments (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL
    )";

const CREATE_JOBS: &str = "CREATE TABLE IF NOT EXISTS jobs (
        id INTEGER PRIMARY KEY,
        title TEXT NOT NULL
    )";

const CREATE_HIRED_EMPLOYEES: &str = "CREATE TABLE IF NOT EXISTS hired_employees (
        id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        hired_at TEXT NOT NULL,
        department_id INTEGER,
        job_id INTEGER,
        FOREIGN KEY (department_id) REFERENCES departments(id),
        FOREIGN KEY (job_id) REFERENCES jobs(id)
    )";

/// Creates the three tables if they do not exist yet.
///
/// Safe to call on every start-up and before every operation.
pub async fn ensure_schema(session: &mut Session) -> Result<(), DatabaseError> {
    for ddl in [CREATE_DEPARTMENTS, CREATE_JOBS, CREATE_HIRED_EMPLOYEES] {
        sqlx::query(ddl).execute(session.conn()).await?;
    }
    debug!("Schema ensured on {}", session.path().display());
    Ok(())
}

/// Rejects names that cannot be spliced into SQL as a quoted identifier.
pub fn validate_identifier(name: &str) -> Result<(), DatabaseError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(DatabaseError::InvalidIdentifier(name.to_string()))
    }
}

/// Double-quotes an identifier for use in generated SQL.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Describes the columns of `table` in declaration order.
///
/// # Errors
///
/// `InvalidIdentifier` for a malformed name, `UnknownTable` when the store
/// reports no columns for it.
pub async fn describe_table(
    session: &mut Session,
    table: &str,
) -> Result<TableDescription, DatabaseError> {
    validate_identifier(table)?;

    let rows = sqlx::query(&format!("PRAGMA table_info({})", quote_identifier(table)))
        .fetch_all(session.conn())
        .await?;

    if rows.is_empty() {
        return Err(DatabaseError::UnknownTable(table.to_string()));
    }

    let columns = rows
        .iter()
        .map(|row| {
            Ok(ColumnDescription {
                name: row.try_get("name")?,
                declared_type: row.try_get("type")?,
                not_null: row.try_get::<i64, _>("notnull")? != 0,
                primary_key: row.try_get::<i64, _>("pk")? != 0,
            })
        })
        .collect::<Result<Vec<_>, sqlx::Error>>()?;

    Ok(TableDescription {
        table: table.to_string(),
        columns,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::open_test_session;

    async fn table_names(session: &mut Session) -> Vec<String> {
        sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type='table' ORDER BY name",
        )
        .fetch_all(session.conn())
        .await
        .expect("Failed to list tables")
    }

    #[tokio::test]
    async fn test_ensure_schema_creates_three_tables() {
        let (_dir, mut session) = open_test_session().await;
        assert_eq!(
            table_names(&mut session).await,
            vec!["departments", "hired_employees", "jobs"]
        );
    }

    #[tokio::test]
    async fn test_ensure_schema_is_idempotent() {
        let (_dir, mut session) = open_test_session().await;
        sqlx::query("INSERT INTO jobs (id, title) VALUES (1, 'Engineer')")
            .execute(session.conn())
            .await
            .expect("insert job");

        ensure_schema(&mut session).await.expect("second call");
        ensure_schema(&mut session).await.expect("third call");

        assert_eq!(
            table_names(&mut session).await,
            vec!["departments", "hired_employees", "jobs"]
        );
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM jobs")
            .fetch_one(session.conn())
            .await
            .expect("count jobs");
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn test_describe_hired_employees() {
        let (_dir, mut session) = open_test_session().await;
        let description = describe_table(&mut session, "hired_employees")
            .await
            .expect("describe");

        assert_eq!(
            description.column_names(),
            vec!["id", "name", "hired_at", "department_id", "job_id"]
        );
        let id = &description.columns[0];
        assert_eq!(id.declared_type, "INTEGER");
        assert!(id.primary_key);
        assert!(description.columns[1].not_null);
        assert!(description.columns[3].nullable());
    }

    #[tokio::test]
    async fn test_describe_unknown_table() {
        let (_dir, mut session) = open_test_session().await;
        let result = describe_table(&mut session, "ghosts").await;
        assert!(matches!(result, Err(DatabaseError::UnknownTable(ref t)) if t == "ghosts"));
    }

    #[test]
    fn test_validate_identifier() {
        assert!(validate_identifier("hired_employees").is_ok());
        assert!(validate_identifier("_t1").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("1jobs").is_err());
        assert!(validate_identifier("jobs; DROP TABLE jobs").is_err());
        assert!(validate_identifier("jobs\"").is_err());
    }

    #[test]
    fn test_quote_identifier_escapes_quotes() {
        assert_eq!(quote_identifier("jobs"), "\"jobs\"");
        assert_eq!(quote_identifier("a\"b"), "\"a\"\"b\"");
    }
}
