//! Flat-file ingestion.
//!
//! Reads one of the three headerless source CSV files, maps its fields
//! positionally onto the dataset's columns, and appends every row to the
//! matching table in one transaction.

mod rows;

use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use log::info;
use serde::Serialize;

use crate::error_handling::IngestError;
use crate::storage::{append_rows, Dataset, Session};

pub use rows::to_row;

/// Outcome of a successful ingest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestSummary {
    pub dataset: String,
    pub rows_written: usize,
}

/// Location of a dataset's source file inside `data_dir`.
pub fn source_path(data_dir: &Path, dataset: Dataset) -> PathBuf {
    data_dir.join(dataset.file_name())
}

/// Appends the contents of `source` to the dataset's table.
///
/// # Errors
///
/// - `SourceNotFound` if `source` does not exist
/// - `Csv` / `InvalidInteger` if the file cannot be parsed
/// - `Database` if the store rejects any row (nothing is written in that case)
pub async fn ingest(
    session: &mut Session,
    dataset: Dataset,
    source: &Path,
) -> Result<IngestSummary, IngestError> {
    if !source.exists() {
        return Err(IngestError::SourceNotFound(source.to_path_buf()));
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(source)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        rows.push(to_row(dataset, &record?)?);
    }

    let rows_written = append_rows(session, dataset.table(), dataset.columns(), &rows).await?;
    info!(
        "Ingested {} rows from {} into {}",
        rows_written,
        source.display(),
        dataset.table()
    );

    Ok(IngestSummary {
        dataset: dataset.to_string(),
        rows_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::test_helpers::{count_rows, open_test_session};
    use sqlx::Row;

    fn write_source(dir: &Path, dataset: Dataset, contents: &str) -> PathBuf {
        let path = source_path(dir, dataset);
        std::fs::write(&path, contents).expect("Failed to write source file");
        path
    }

    #[tokio::test]
    async fn test_ingest_departments() {
        let (dir, mut session) = open_test_session().await;
        let path = write_source(
            dir.path(),
            Dataset::Departments,
            "1,Product Management\n2,Sales\n3,Research and Development\n",
        );

        let summary = ingest(&mut session, Dataset::Departments, &path)
            .await
            .expect("ingest should succeed");
        assert_eq!(summary.rows_written, 3);
        assert_eq!(summary.dataset, "departments");

        let name: String = sqlx::query_scalar("SELECT name FROM departments WHERE id = 2")
            .fetch_one(session.conn())
            .await
            .expect("fetch");
        assert_eq!(name, "Sales");
    }

    #[tokio::test]
    async fn test_ingest_hired_applies_null_policy() {
        let (dir, mut session) = open_test_session().await;
        let path = write_source(
            dir.path(),
            Dataset::HiredEmployees,
            "1,Harold Vogt,2021-11-07T02:48:42Z,2,96\n2,,2021-07-27T16:02:08Z,1,2\n3,Ty Hofer,,,\n",
        );

        ingest(&mut session, Dataset::HiredEmployees, &path)
            .await
            .expect("ingest should succeed");

        let unnamed: String = sqlx::query_scalar("SELECT name FROM hired_employees WHERE id = 2")
            .fetch_one(session.conn())
            .await
            .expect("fetch name");
        assert_eq!(unnamed, "Unknown");

        let row = sqlx::query(
            "SELECT hired_at, department_id, job_id FROM hired_employees WHERE id = 3",
        )
        .fetch_one(session.conn())
        .await
        .expect("fetch row");
        assert_eq!(row.get::<String, _>("hired_at"), "2000-01-01 00:00:00");
        assert_eq!(row.get::<Option<i64>, _>("department_id"), None);
        assert_eq!(row.get::<Option<i64>, _>("job_id"), None);
    }

    #[tokio::test]
    async fn test_ingest_appends_to_existing_rows() {
        let (dir, mut session) = open_test_session().await;
        let first = write_source(dir.path(), Dataset::Jobs, "1,Recruiter\n");
        ingest(&mut session, Dataset::Jobs, &first)
            .await
            .expect("first ingest");

        let second = write_source(dir.path(), Dataset::Jobs, "2,Manager\n3,Analyst\n");
        ingest(&mut session, Dataset::Jobs, &second)
            .await
            .expect("second ingest");

        assert_eq!(count_rows(&mut session, "jobs").await, 3);
    }

    #[tokio::test]
    async fn test_ingest_duplicate_id_writes_nothing() {
        let (dir, mut session) = open_test_session().await;
        let path = write_source(dir.path(), Dataset::Jobs, "1,Recruiter\n2,Manager\n1,Duplicate\n");

        let result = ingest(&mut session, Dataset::Jobs, &path).await;
        assert!(matches!(result, Err(IngestError::Database(_))));
        assert_eq!(count_rows(&mut session, "jobs").await, 0);
    }

    #[tokio::test]
    async fn test_ingest_missing_file() {
        let (dir, mut session) = open_test_session().await;
        let path = source_path(dir.path(), Dataset::Departments);

        let result = ingest(&mut session, Dataset::Departments, &path).await;
        assert!(matches!(result, Err(IngestError::SourceNotFound(ref p)) if *p == path));
    }

    #[tokio::test]
    async fn test_ingest_department_without_name_fails() {
        let (dir, mut session) = open_test_session().await;
        let path = write_source(dir.path(), Dataset::Departments, "1,Sales\n2,\n");

        let result = ingest(&mut session, Dataset::Departments, &path).await;
        assert!(matches!(result, Err(IngestError::Database(_))));
        assert_eq!(count_rows(&mut session, "departments").await, 0);
    }

    #[tokio::test]
    async fn test_ingest_bad_integer_reports_line() {
        let (dir, mut session) = open_test_session().await;
        let path = write_source(dir.path(), Dataset::Jobs, "1,Recruiter\nx,Manager\n");

        let err = ingest(&mut session, Dataset::Jobs, &path)
            .await
            .expect_err("should fail");
        assert!(err.to_string().contains("Line 2"), "got: {err}");
    }
}
