// storage/mod.rs
// Relational store adapter: sessions, schema, inserts

pub mod insert;
pub mod models;
pub mod schema;
pub mod session;
#[cfg(test)]
pub(crate) mod test_helpers;

// Re-export commonly used items
pub use insert::{append_rows, insert_hired};
pub use models::{CellValue, ColumnDescription, Dataset, HiredEmployee, HiredTuple, TableDescription};
pub use schema::{describe_table, ensure_schema, quote_identifier, validate_identifier};
pub use session::Session;
