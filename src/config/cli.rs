//! Command-line interface definition.
//!
//! Lives in the library so the parser can be exercised from tests; `main.rs`
//! only dispatches.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::constants::{
    BACKUP_DIR, DATA_DIR, DB_PATH, DEFAULT_HOST, DEFAULT_PORT, REPORT_YEAR,
};
use crate::config::{Config, LogFormat, LogLevel};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "hiring_ledger",
    version,
    about = "Load hiring datasets into SQLite and back tables up to Avro containers"
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every subcommand.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// SQLite database file
    #[arg(long, global = true, env = "HIRING_LEDGER_DB_PATH", default_value = DB_PATH)]
    pub db_path: PathBuf,

    /// Directory containing the source CSV files
    #[arg(long, global = true, env = "HIRING_LEDGER_DATA_DIR", default_value = DATA_DIR)]
    pub data_dir: PathBuf,

    /// Directory receiving backup containers
    #[arg(long, global = true, env = "HIRING_LEDGER_BACKUP_DIR", default_value = BACKUP_DIR)]
    pub backup_dir: PathBuf,

    #[arg(long, global = true, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API
    Serve {
        #[arg(long, default_value = DEFAULT_HOST)]
        host: String,
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
    },
    /// Append one source dataset (departments, jobs, hired_employees) to its table
    Upload {
        dataset: String,
    },
    /// Insert hired employees from a JSON file of 5-element arrays
    Insert {
        file: PathBuf,
    },
    /// Write every row of a table to its backup container
    Backup {
        table: String,
    },
    /// Re-insert the rows of a table's backup container
    Restore {
        table: String,
    },
    /// Print a hiring report as JSON
    Report {
        #[command(subcommand)]
        report: ReportCommand,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Hires per department and job for each quarter of a year
    Quarterly {
        #[arg(long, default_value_t = REPORT_YEAR)]
        year: i32,
    },
    /// Departments that hired more than the mean in a year
    AboveMean {
        #[arg(long, default_value_t = REPORT_YEAR)]
        year: i32,
    },
}

impl From<&GlobalArgs> for Config {
    fn from(args: &GlobalArgs) -> Self {
        Config {
            db_path: args.db_path.clone(),
            data_dir: args.data_dir.clone(),
            backup_dir: args.backup_dir.clone(),
            log_level: args.log_level.clone(),
            log_format: args.log_format.clone(),
        }
    }
}
