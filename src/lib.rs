//! hiring_ledger library: hiring data ingestion, table backup and reports
//!
//! This library loads the three hiring datasets (departments, jobs, hired
//! employees) from headerless CSV files into SQLite, accepts bulk hire records,
//! writes tables to self-describing Avro containers and restores them, and
//! computes the hiring reports.
//!
//! Every operation in [`service`] opens its own database session from a
//! [`Config`] and reports failures as a [`ServiceError`].
//!
//! # Example
//!
//! ```no_run
//! use hiring_ledger::{service, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::default();
//!
//! let summary = service::upload_dataset(&config, "departments").await?;
//! println!("{} rows written", summary.rows_written);
//!
//! let backup = service::backup_table(&config, "departments").await?;
//! println!("{} records in {}", backup.record_count, backup.container_path.display());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

pub mod backup;
pub mod config;
pub mod error_handling;
pub mod ingest;
pub mod initialization;
pub mod reports;
pub mod server;
pub mod service;
pub mod storage;

// Re-export public API
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{ErrorKind, ServiceError};
pub use storage::{Dataset, HiredEmployee};
