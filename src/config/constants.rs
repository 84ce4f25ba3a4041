//! Configuration constants.
//!
//! Default locations, sentinel values and report parameters shared by the
//! ingestion, backup and reporting paths.

/// Default SQLite database file.
pub const DB_PATH: &str = "./database.db";

/// Default directory holding the three source CSV files.
pub const DATA_DIR: &str = "./files";

/// Default directory receiving backup containers.
pub const BACKUP_DIR: &str = "./backups";

/// Suffix appended to the table name to form the container file name.
pub const BACKUP_FILE_SUFFIX: &str = "_backup.avro";

/// Sentinel stored for a hire whose name is missing in the source file.
pub const UNKNOWN_NAME: &str = "Unknown";

/// Sentinel stored for a hire whose timestamp is missing in the source file.
pub const DEFAULT_HIRED_AT: &str = "2000-01-01 00:00:00";

/// Year aggregated by the reports when the caller does not pass one.
pub const REPORT_YEAR: i32 = 2021;

/// Default bind address of the HTTP server.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default port of the HTTP server.
pub const DEFAULT_PORT: u16 = 9000;

/// Name of the Avro record type written into every container schema.
pub const CONTAINER_RECORD_NAME: &str = "BackupRecord";

/// Container metadata key holding the source table name.
pub const METADATA_TABLE_KEY: &str = "hiring_ledger.table";

/// Container metadata key holding the JSON column descriptions.
pub const METADATA_COLUMNS_KEY: &str = "hiring_ledger.columns";
