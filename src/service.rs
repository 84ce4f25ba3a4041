//! Operation boundary.
//!
//! One function per operation exposed over HTTP and the CLI. Each opens its
//! own session, runs the component, releases the session on every path, and
//! reports failures as `ServiceError` with the original failure text.

use std::str::FromStr;

use log::{debug, warn};

use crate::backup::{self, BackupSummary, RestoreSummary};
use crate::config::Config;
use crate::error_handling::{categorize_insert_error, ServiceError};
use crate::ingest::{self, IngestSummary};
use crate::reports::{self, DepartmentHires, QuarterlyHires};
use crate::storage::{self, ensure_schema, Dataset, HiredEmployee, HiredTuple, Session};

async fn open_session(config: &Config) -> Result<Session, ServiceError> {
    let mut session = Session::open(&config.db_path).await?;
    ensure_schema(&mut session).await?;
    Ok(session)
}

/// Closes `session` and hands back the operation's outcome.
///
/// A failure to close is logged, never reported over the outcome.
async fn finish<T>(
    operation: &str,
    session: Session,
    outcome: Result<T, ServiceError>,
) -> Result<T, ServiceError> {
    if let Err(e) = session.close().await {
        warn!("Failed to close database session after {operation}: {e}");
    }
    if let Err(ref e) = outcome {
        warn!("{operation} failed ({}): {}", e.kind().as_str(), e.message());
    } else {
        debug!("{operation} completed");
    }
    outcome
}

/// Parses a dataset kind (`departments`, `jobs`, `hired_employees`).
pub fn parse_dataset(kind: &str) -> Result<Dataset, ServiceError> {
    Dataset::from_str(kind).map_err(|_| {
        ServiceError::BadRequest(format!(
            "Invalid file type '{kind}': expected departments, jobs or hired_employees"
        ))
    })
}

/// Parses a bulk payload: a JSON array of `[id, name, hired_at, department_id, job_id]`.
pub fn parse_hired_payload(payload: &[u8]) -> Result<Vec<HiredEmployee>, ServiceError> {
    let tuples: Vec<HiredTuple> = serde_json::from_slice(payload).map_err(|e| {
        ServiceError::BadRequest(format!(
            "Invalid payload: expected [[id, name, hired_at, department_id, job_id], ...]: {e}"
        ))
    })?;
    Ok(tuples.into_iter().map(HiredEmployee::from).collect())
}

/// Appends the dataset's source file from the data directory to its table.
pub async fn upload_dataset(config: &Config, kind: &str) -> Result<IngestSummary, ServiceError> {
    let dataset = parse_dataset(kind)?;
    let source = ingest::source_path(&config.data_dir, dataset);

    let mut session = open_session(config).await?;
    let outcome = ingest::ingest(&mut session, dataset, &source)
        .await
        .map_err(ServiceError::from);
    finish("upload", session, outcome).await
}

/// Inserts already-structured hire records in one batch.
///
/// Store rejections are the caller's fault here and surface as `BadRequest`.
pub async fn insert_hired_employees(
    config: &Config,
    records: &[HiredEmployee],
) -> Result<usize, ServiceError> {
    let mut session = open_session(config).await?;
    let outcome = storage::insert_hired(&mut session, records)
        .await
        .map_err(categorize_insert_error);
    finish("bulk insert", session, outcome).await
}

/// Writes every row of `table` to its backup container.
pub async fn backup_table(config: &Config, table: &str) -> Result<BackupSummary, ServiceError> {
    let mut session = open_session(config).await?;
    let outcome = backup::backup(&mut session, table, &config.backup_dir)
        .await
        .map_err(ServiceError::from);
    finish("backup", session, outcome).await
}

/// Re-inserts the rows of `table`'s backup container.
pub async fn restore_table(config: &Config, table: &str) -> Result<RestoreSummary, ServiceError> {
    let mut session = open_session(config).await?;
    let outcome = backup::restore(&mut session, table, &config.backup_dir)
        .await
        .map_err(ServiceError::from);
    finish("restore", session, outcome).await
}

/// Hires per department and job for each quarter of `year`.
pub async fn quarterly_hires(config: &Config, year: i32) -> Result<Vec<QuarterlyHires>, ServiceError> {
    let mut session = open_session(config).await?;
    let outcome = reports::quarterly_hires(&mut session, year)
        .await
        .map_err(ServiceError::from);
    finish("quarterly report", session, outcome).await
}

/// Departments that hired more than the mean in `year`; empty when none did.
pub async fn departments_above_mean(
    config: &Config,
    year: i32,
) -> Result<Vec<DepartmentHires>, ServiceError> {
    let mut session = open_session(config).await?;
    let outcome = reports::departments_above_mean(&mut session, year)
        .await
        .map_err(ServiceError::from);
    finish("above-mean report", session, outcome).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::ErrorKind;
    use tempfile::TempDir;

    fn test_config(dir: &TempDir) -> Config {
        let data_dir = dir.path().join("files");
        std::fs::create_dir_all(&data_dir).expect("data dir");
        Config {
            db_path: dir.path().join("database.db"),
            data_dir,
            backup_dir: dir.path().join("backups"),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_dataset_rejects_unknown_kind() {
        let err = parse_dataset("employees").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(err.message().contains("employees"));
        assert_eq!(parse_dataset("jobs"), Ok(Dataset::Jobs));
    }

    #[test]
    fn test_parse_hired_payload() {
        let records = parse_hired_payload(
            br#"[[1, "Ada", "2021-01-01 00:00:00", 2, null], [2, "Grace", "2021-02-01 00:00:00", null, 3]]"#,
        )
        .expect("valid payload");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].job_id, None);
        assert_eq!(records[1].department_id, None);
        assert_eq!(records[1].job_id, Some(3));
    }

    #[test]
    fn test_parse_hired_payload_rejects_wrong_arity() {
        let err = parse_hired_payload(br#"[[1, "Ada", "2021-01-01 00:00:00", 2]]"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_parse_hired_payload_rejects_wrong_types() {
        assert!(parse_hired_payload(br#"[["one", "Ada", "2021", 2, 3]]"#).is_err());
        assert!(parse_hired_payload(br#"{"id": 1}"#).is_err());
        assert!(parse_hired_payload(b"not json").is_err());
    }

    #[tokio::test]
    async fn test_upload_missing_file_is_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let config = test_config(&dir);

        let err = upload_dataset(&config, "departments").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.message().contains("departments.csv"));
    }

    #[tokio::test]
    async fn test_upload_invalid_kind_is_bad_request() {
        let dir = TempDir::new().expect("temp dir");
        let config = test_config(&dir);

        let err = upload_dataset(&config, "managers").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
    }

    #[tokio::test]
    async fn test_upload_store_failure_is_internal() {
        let dir = TempDir::new().expect("temp dir");
        let config = test_config(&dir);
        std::fs::write(config.data_dir.join("jobs.csv"), "1,Recruiter\n1,Manager\n")
            .expect("write");

        let err = upload_dataset(&config, "jobs").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert!(err.message().contains("UNIQUE"), "got: {}", err.message());
    }

    #[tokio::test]
    async fn test_bulk_insert_duplicate_is_bad_request() {
        let dir = TempDir::new().expect("temp dir");
        let config = test_config(&dir);
        let records = parse_hired_payload(
            br#"[[1, "Ada", "2021-01-01 00:00:00", 1, 1], [1, "Ada", "2021-01-01 00:00:00", 1, 1]]"#,
        )
        .expect("payload");

        let err = insert_hired_employees(&config, &records).await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BadRequest);
        assert!(err.message().contains("UNIQUE"), "got: {}", err.message());
    }

    #[tokio::test]
    async fn test_backup_and_restore_through_fresh_database() {
        let dir = TempDir::new().expect("temp dir");
        let config = test_config(&dir);
        std::fs::write(
            config.data_dir.join("departments.csv"),
            "1,Product Management\n2,Sales\n",
        )
        .expect("write");
        upload_dataset(&config, "departments").await.expect("upload");

        let summary = backup_table(&config, "departments").await.expect("backup");
        assert_eq!(summary.record_count, 2);
        assert_eq!(summary.container_path, config.container_path("departments"));

        let fresh = Config {
            db_path: dir.path().join("restored.db"),
            ..config.clone()
        };
        let restored = restore_table(&fresh, "departments").await.expect("restore");
        assert_eq!(restored.rows_restored, 2);
    }

    #[tokio::test]
    async fn test_backup_empty_table_is_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let config = test_config(&dir);

        let err = backup_table(&config, "jobs").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(!config.container_path("jobs").exists());
    }

    #[tokio::test]
    async fn test_restore_without_container_is_not_found() {
        let dir = TempDir::new().expect("temp dir");
        let config = test_config(&dir);

        let err = restore_table(&config, "jobs").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}
