//! Conversion of positional CSV records into table rows.
//!
//! A blank field (empty or whitespace only) is treated as missing; other
//! text is stored as read, and integers may carry surrounding spaces. Only
//! `hired_employees` has a null policy: a missing name or hire timestamp is
//! replaced by a sentinel. Everything else passes through, including missing
//! values for NOT NULL columns, which the store then rejects.

use csv::StringRecord;

use crate::config::{DEFAULT_HIRED_AT, UNKNOWN_NAME};
use crate::error_handling::IngestError;
use crate::storage::{CellValue, Dataset};

fn field(record: &StringRecord, index: usize) -> Option<&str> {
    record
        .get(index)
        .filter(|value| !value.trim().is_empty())
}

fn integer(
    record: &StringRecord,
    index: usize,
    column: &'static str,
) -> Result<CellValue, IngestError> {
    match field(record, index).map(str::trim) {
        None => Ok(CellValue::Null),
        Some(value) => value
            .parse::<i64>()
            .map(CellValue::Integer)
            .map_err(|_| IngestError::InvalidInteger {
                line: record.position().map_or(0, |p| p.line()),
                column,
                value: value.to_string(),
            }),
    }
}

fn text(record: &StringRecord, index: usize) -> CellValue {
    field(record, index).map(str::to_string).into()
}

fn text_or(record: &StringRecord, index: usize, sentinel: &str) -> CellValue {
    CellValue::Text(field(record, index).unwrap_or(sentinel).to_string())
}

/// Maps one source record onto the dataset's columns.
pub fn to_row(dataset: Dataset, record: &StringRecord) -> Result<Vec<CellValue>, IngestError> {
    let row = match dataset {
        Dataset::Departments | Dataset::Jobs => vec![integer(record, 0, "id")?, text(record, 1)],
        Dataset::HiredEmployees => vec![
            integer(record, 0, "id")?,
            text_or(record, 1, UNKNOWN_NAME),
            text_or(record, 2, DEFAULT_HIRED_AT),
            integer(record, 3, "department_id")?,
            integer(record, 4, "job_id")?,
        ],
    };
    Ok(row)
}
