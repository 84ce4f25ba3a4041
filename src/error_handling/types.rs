//! Error type definitions.
//!
//! Component errors are typed per subsystem; `ServiceError` is the taxonomy
//! every operation reports at its boundary.

use std::path::PathBuf;

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),

    /// A table name that cannot be used as an SQL identifier.
    #[error("Invalid table name '{0}': expected letters, digits and underscores")]
    InvalidIdentifier(String),

    /// The table does not exist (no columns reported by the store).
    #[error("Table '{0}' does not exist")]
    UnknownTable(String),
}

/// Error types for reading source files into the store.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The dataset's source file does not exist.
    #[error("File not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// The CSV reader failed (I/O or malformed record).
    #[error("CSV read error: {0}")]
    Csv(#[from] csv::Error),

    /// A field that must hold an integer does not.
    #[error("Line {line}: column '{column}' is not an integer: '{value}'")]
    InvalidInteger {
        line: u64,
        column: &'static str,
        value: String,
    },

    /// The store rejected the rows.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

/// Error types for backup container encoding and decoding.
#[derive(Error, Debug)]
pub enum ContainerError {
    /// File system error while creating or opening a container.
    #[error("Container I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Avro schema, encoding or decoding error (including truncated files).
    #[error("Avro error: {0}")]
    Avro(#[from] apache_avro::Error),

    /// Column metadata could not be serialized or parsed.
    #[error("Container metadata error: {0}")]
    Metadata(#[from] serde_json::Error),

    /// A column name that is not a valid Avro field name.
    #[error("Column '{0}' cannot be used as a container field name")]
    InvalidFieldName(String),

    /// A decoded datum that is not a flat record of scalar values.
    #[error("Unexpected value in container: {0}")]
    UnexpectedValue(String),
}

/// Error types for the backup and restore operations.
#[derive(Error, Debug)]
pub enum BackupError {
    /// Describing or reading the source table failed.
    #[error(transparent)]
    Database(#[from] DatabaseError),

    /// Writing or reading the container failed.
    #[error(transparent)]
    Container(#[from] ContainerError),

    /// The table holds no rows, so there is nothing to back up.
    #[error("No data found in table {0}")]
    EmptyTable(String),

    /// No container exists for the table.
    #[error("Backup file not found for table {table}: {}", .path.display())]
    ContainerNotFound { table: String, path: PathBuf },

    /// The container exists but holds no records.
    #[error("No data found in backup for {0}")]
    EmptyContainer(String),

    /// The store rejected the restored rows.
    #[error("Restore of {table} failed: {source}")]
    Restore {
        table: String,
        #[source]
        source: DatabaseError,
    },
}

/// Kinds of failure reported to callers.
///
/// Callers use the kind to decide whether resubmitting makes sense:
/// `BadRequest` needs different input, `NotFound` needs missing state to
/// exist first, `Internal` may succeed on retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Internal,
}

impl ErrorKind {
    /// HTTP status code the façade answers with.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NotFound => 404,
            ErrorKind::Internal => 500,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadRequest => "bad_request",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Failure of a service operation, carrying the original failure text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::BadRequest(_) => ErrorKind::BadRequest,
            ServiceError::NotFound(_) => ErrorKind::NotFound,
            ServiceError::Internal(_) => ErrorKind::Internal,
        }
    }

    /// The failure text without the kind.
    pub fn message(&self) -> &str {
        match self {
            ServiceError::BadRequest(m) | ServiceError::NotFound(m) | ServiceError::Internal(m) => m,
        }
    }
}
