//! Error categorization.
//!
//! Maps component errors onto the `ServiceError` taxonomy. Operations whose
//! input decides the category (bulk inserts, missing files, empty tables)
//! construct the variant explicitly instead of relying on these defaults.

use super::types::{BackupError, ContainerError, DatabaseError, IngestError, ServiceError};

impl From<DatabaseError> for ServiceError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::InvalidIdentifier(_) => ServiceError::BadRequest(error.to_string()),
            DatabaseError::UnknownTable(_) => ServiceError::NotFound(error.to_string()),
            DatabaseError::FileCreationError(_) | DatabaseError::SqlError(_) => {
                ServiceError::Internal(error.to_string())
            }
        }
    }
}

impl From<IngestError> for ServiceError {
    fn from(error: IngestError) -> Self {
        match error {
            IngestError::Database(db @ DatabaseError::SqlError(_)) => {
                ServiceError::Internal(format!("Ingestion failed: {db}"))
            }
            IngestError::Database(other) => ServiceError::from(other),
            IngestError::SourceNotFound(path) => {
                ServiceError::NotFound(format!("File not found: {}", path.display()))
            }
            other => ServiceError::Internal(format!("Ingestion failed: {other}")),
        }
    }
}

impl From<ContainerError> for ServiceError {
    fn from(error: ContainerError) -> Self {
        ServiceError::Internal(error.to_string())
    }
}

impl From<BackupError> for ServiceError {
    fn from(error: BackupError) -> Self {
        match error {
            BackupError::Database(db) => ServiceError::from(db),
            BackupError::EmptyTable(_)
            | BackupError::ContainerNotFound { .. }
            | BackupError::EmptyContainer(_) => ServiceError::NotFound(error.to_string()),
            BackupError::Container(_) | BackupError::Restore { .. } => {
                ServiceError::Internal(error.to_string())
            }
        }
    }
}

/// Categorizes a store failure caused by caller-supplied rows.
///
/// Constraint violations and type mismatches in a bulk payload are the
/// caller's fault, so they surface as `BadRequest` rather than `Internal`.
pub fn categorize_insert_error(error: DatabaseError) -> ServiceError {
    match error {
        DatabaseError::SqlError(sqlx::Error::Database(db_err)) => {
            ServiceError::BadRequest(db_err.message().to_string())
        }
        other => ServiceError::from(other),
    }
}
