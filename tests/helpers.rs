// Shared test helpers for workspace setup and seed data.
//
// Each test gets its own temporary directory holding the database, the source
// files and the backup directory.

use std::path::Path;

use hiring_ledger::Config;
use tempfile::TempDir;

/// Creates an isolated workspace and a `Config` pointing into it.
pub fn test_workspace() -> (TempDir, Config) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let data_dir = dir.path().join("files");
    std::fs::create_dir_all(&data_dir).expect("Failed to create data dir");
    let config = Config {
        db_path: dir.path().join("database.db"),
        data_dir,
        backup_dir: dir.path().join("backups"),
        ..Default::default()
    };
    (dir, config)
}

/// Writes `contents` as `<data_dir>/<name>`.
pub fn write_source(config: &Config, name: &str, contents: &str) {
    std::fs::write(config.data_dir.join(name), contents).expect("Failed to write source file");
}

/// Writes a small but complete set of the three source files.
#[allow(dead_code)] // Used by other test files
pub fn seed_sources(config: &Config) {
    write_source(
        config,
        "departments.csv",
        "1,Product Management\n2,Sales\n3,Research and Development\n",
    );
    write_source(config, "jobs.csv", "1,Recruiter\n2,Manager\n");
    write_source(
        config,
        "hired_employees.csv",
        "1,Harold Vogt,2021-02-15T10:00:00Z,2,1\n\
         2,Ty Hofer,2021-05-01T09:30:00Z,2,1\n\
         3,Lyman Hadye,2021-11-30T16:00:00Z,2,1\n\
         4,,2021-07-27T16:02:08Z,1,2\n\
         5,Lucas Lima,,,\n",
    );
}

/// Counts rows of `table` in the database at `db_path`.
#[allow(dead_code)] // Used by other test files
pub async fn count_rows(db_path: &Path, table: &str) -> i64 {
    use sqlx::{Connection, SqliteConnection};

    let mut conn = SqliteConnection::connect(&format!("sqlite:{}", db_path.display()))
        .await
        .expect("Failed to open database");
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM \"{}\"", table))
        .fetch_one(&mut conn)
        .await
        .expect("Failed to count rows");
    conn.close().await.expect("Failed to close connection");
    count
}
