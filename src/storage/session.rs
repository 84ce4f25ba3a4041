//! Database session management.
//!
//! Every operation works against its own `Session`: a single SQLite connection
//! opened for the call and released when the session is closed or dropped.
//! Sessions are configured with:
//! - Automatic database file creation
//! - WAL mode enabled for concurrent readers
//! - Foreign-key enforcement disabled (references are declared, not checked)

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;

use crate::error_handling::DatabaseError;

/// An open connection to the database file.
#[derive(Debug)]
pub struct Session {
    conn: SqliteConnection,
    path: PathBuf,
}

impl Session {
    /// Opens a session on `db_path`, creating the file if it doesn't exist.
    pub async fn open(db_path: &Path) -> Result<Self, DatabaseError> {
        match OpenOptions::new()
            .read(true)
            .write(true)
            .create_new(true)
            .open(db_path)
        {
            Ok(_) => info!("Database file {} created.", db_path.display()),
            Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
                debug!("Database file {} already exists.", db_path.display())
            }
            Err(e) => {
                error!("Failed to create database file: {e}");
                return Err(DatabaseError::FileCreationError(e.to_string()));
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .foreign_keys(false);

        let mut conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| {
                error!("Failed to connect to database: {e}");
                DatabaseError::SqlError(e)
            })?;

        sqlx::query("PRAGMA journal_mode=WAL")
            .execute(&mut conn)
            .await
            .map_err(|e| {
                error!("Failed to set WAL mode: {e}");
                DatabaseError::SqlError(e)
            })?;

        Ok(Self {
            conn,
            path: db_path.to_path_buf(),
        })
    }

    /// The underlying connection, for running queries.
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.conn
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Closes the connection, flushing any pending shutdown work.
    ///
    /// Dropping a session also releases the connection; `close` additionally
    /// reports errors raised while shutting it down.
    pub async fn close(self) -> Result<(), DatabaseError> {
        self.conn.close().await.map_err(DatabaseError::SqlError)
    }
}
