//! HTTP handlers.

mod ingest;
mod reports;
mod tables;

pub use ingest::{insert_handler, upload_handler};
pub use reports::{above_mean_handler, quarterly_handler};
pub use tables::{backup_handler, restore_handler};
