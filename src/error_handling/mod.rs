//! Error handling.
//!
//! This module provides:
//! - Typed errors for each subsystem (database, ingestion, containers, start-up)
//! - The `ServiceError` taxonomy reported at every operation boundary
//! - Categorization from component errors into that taxonomy
//!
//! Failures are categorized into:
//! - **BadRequest**: the caller's input cannot be processed as given
//! - **NotFound**: a source file, table or container does not exist or is empty
//! - **Internal**: store, I/O or container failures

mod categorization;
mod types;

pub use categorization::categorize_insert_error;
pub use types::{
    BackupError, ContainerError, DatabaseError, ErrorKind, IngestError, InitializationError, ServiceError,
};
