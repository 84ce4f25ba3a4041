//! Table backup and restore through self-describing containers.
//!
//! `backup` describes a table, writes every row as a flat string record to
//! `<backup_dir>/<table>_backup.avro`, and `restore` reads that file back into
//! the table. See `container` for the file layout.

pub mod container;
mod decoder;
mod encoder;

pub use container::{read_container, write_container, ContainerSchema, DecodedContainer, FlatRecord};
pub use decoder::{restore, RestoreSummary};
pub use encoder::{backup, BackupSummary};
