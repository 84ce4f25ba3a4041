//! Shared test helpers for storage and backup tests.

#[cfg(test)]
use tempfile::TempDir;

#[cfg(test)]
use crate::storage::{ensure_schema, Session};

/// Opens a session on a fresh database file with the schema applied.
/// The returned `TempDir` must be kept alive for the duration of the test.
#[cfg(test)]
pub async fn open_test_session() -> (TempDir, Session) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut session = Session::open(&dir.path().join("test.db"))
        .await
        .expect("Failed to open test database");
    ensure_schema(&mut session)
        .await
        .expect("Failed to create schema");
    (dir, session)
}

/// Counts the rows of `table`.
#[cfg(test)]
pub async fn count_rows(session: &mut Session, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM \"{table}\""))
        .fetch_one(session.conn())
        .await
        .expect("Failed to count rows")
}
