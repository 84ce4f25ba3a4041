//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `hiring_ledger` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - User-facing output formatting
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::process;

use hiring_ledger::config::cli::{Cli, Command, ReportCommand};
use hiring_ledger::initialization::init_logger_with;
use hiring_ledger::{server, service, Config};

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    println!("{}", json);
    Ok(())
}

async fn run(command: Command, config: Config) -> Result<()> {
    match command {
        Command::Serve { host, port } => server::start_server(&host, port, config).await,
        Command::Upload { dataset } => {
            let summary = service::upload_dataset(&config, &dataset).await?;
            println!(
                "Loaded {} row{} into {}",
                summary.rows_written,
                if summary.rows_written == 1 { "" } else { "s" },
                summary.dataset
            );
            Ok(())
        }
        Command::Insert { file } => {
            let payload = std::fs::read(&file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let records = service::parse_hired_payload(&payload)?;
            let count = service::insert_hired_employees(&config, &records).await?;
            println!("Inserted {} hired employee record{}", count, if count == 1 { "" } else { "s" });
            Ok(())
        }
        Command::Backup { table } => {
            let summary = service::backup_table(&config, &table).await?;
            println!(
                "Backed up {} record{} from {} to {}",
                summary.record_count,
                if summary.record_count == 1 { "" } else { "s" },
                summary.table,
                summary.container_path.display()
            );
            Ok(())
        }
        Command::Restore { table } => {
            let summary = service::restore_table(&config, &table).await?;
            println!(
                "Restored {} row{} into {}",
                summary.rows_restored,
                if summary.rows_restored == 1 { "" } else { "s" },
                summary.table
            );
            Ok(())
        }
        Command::Report { report } => match report {
            ReportCommand::Quarterly { year } => {
                print_json(&service::quarterly_hires(&config, year).await?)
            }
            ReportCommand::AboveMean { year } => {
                let report = service::departments_above_mean(&config, year).await?;
                if report.is_empty() {
                    println!("No departments hired above the mean in {}", year);
                    return Ok(());
                }
                print_json(&report)
            }
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file (if it exists)
    // Try loading from current directory first, then from the executable's directory
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let cli = Cli::parse();
    let config = Config::from(&cli.global);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(cli.command, config).await {
        eprintln!("hiring_ledger error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
