//! Configuration types.
//!
//! This module defines enums and structs shared by the library and the CLI.

use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::config::constants::{BACKUP_DIR, BACKUP_FILE_SUFFIX, DATA_DIR, DB_PATH};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// Every operation receives the locations it works against from here; nothing
/// is read from the working directory implicitly.
///
/// # Examples
///
/// ```no_run
/// use hiring_ledger::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     db_path: PathBuf::from("/var/lib/hiring/database.db"),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Database path (SQLite file)
    pub db_path: PathBuf,

    /// Directory containing `departments.csv`, `jobs.csv` and `hired_employees.csv`
    pub data_dir: PathBuf,

    /// Directory receiving backup containers
    pub backup_dir: PathBuf,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Config {
    /// Path of the container holding the backup of `table`.
    pub fn container_path(&self, table: &str) -> PathBuf {
        container_path(&self.backup_dir, table)
    }
}

/// Deterministic container location for `table` under `backup_dir`.
pub fn container_path(backup_dir: &Path, table: &str) -> PathBuf {
    backup_dir.join(format!("{table}{BACKUP_FILE_SUFFIX}"))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DB_PATH),
            data_dir: PathBuf::from(DATA_DIR),
            backup_dir: PathBuf::from(BACKUP_DIR),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_log_level_ordering() {
        let error = log::LevelFilter::from(LogLevel::Error);
        let warn = log::LevelFilter::from(LogLevel::Warn);
        let info = log::LevelFilter::from(LogLevel::Info);
        let debug = log::LevelFilter::from(LogLevel::Debug);
        let trace = log::LevelFilter::from(LogLevel::Trace);

        assert!(error < warn);
        assert!(warn < info);
        assert!(info < debug);
        assert!(debug < trace);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.db_path, PathBuf::from("./database.db"));
        assert_eq!(config.data_dir, PathBuf::from("./files"));
        assert_eq!(config.backup_dir, PathBuf::from("./backups"));
        assert!(matches!(config.log_format, LogFormat::Plain));
    }

    #[test]
    fn test_container_path_is_named_from_table() {
        let config = Config {
            backup_dir: PathBuf::from("/tmp/backups"),
            ..Default::default()
        };
        assert_eq!(
            config.container_path("jobs"),
            PathBuf::from("/tmp/backups/jobs_backup.avro")
        );
        assert_eq!(
            config.container_path("hired_employees"),
            PathBuf::from("/tmp/backups/hired_employees_backup.avro")
        );
    }
}
