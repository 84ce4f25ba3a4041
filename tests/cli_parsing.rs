//! CLI parsing tests.

use std::path::PathBuf;

use clap::Parser;
use hiring_ledger::config::cli::{Cli, Command, ReportCommand};
use hiring_ledger::Config;

#[test]
fn test_report_subcommands() {
    let cli = Cli::try_parse_from(["hiring_ledger", "report", "quarterly"]).expect("parse");
    assert!(matches!(
        cli.command,
        Command::Report {
            report: ReportCommand::Quarterly { year: 2021 }
        }
    ));

    let cli = Cli::try_parse_from(["hiring_ledger", "report", "above-mean", "--year", "2020"])
        .expect("parse");
    assert!(matches!(
        cli.command,
        Command::Report {
            report: ReportCommand::AboveMean { year: 2020 }
        }
    ));
}

#[test]
fn test_global_args_become_config() {
    let cli = Cli::try_parse_from([
        "hiring_ledger",
        "--db-path",
        "/tmp/h.db",
        "--data-dir",
        "/tmp/files",
        "upload",
        "jobs",
    ])
    .expect("parse");
    let config = Config::from(&cli.global);
    assert_eq!(config.db_path, PathBuf::from("/tmp/h.db"));
    assert_eq!(config.data_dir, PathBuf::from("/tmp/files"));
    assert!(matches!(cli.command, Command::Upload { ref dataset } if dataset == "jobs"));
}

#[test]
fn test_insert_requires_file() {
    assert!(Cli::try_parse_from(["hiring_ledger", "insert"]).is_err());
}

#[test]
fn test_unknown_subcommand_rejected() {
    assert!(Cli::try_parse_from(["hiring_ledger", "scan"]).is_err());
}
