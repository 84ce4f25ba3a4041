// storage/models.rs
// Database models and types

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

/// One of the three source datasets, named after the table it loads.
///
/// Parses from and displays as its snake_case table name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum Dataset {
    Departments,
    Jobs,
    HiredEmployees,
}

impl Dataset {
    /// Table receiving the dataset's rows.
    pub fn table(self) -> &'static str {
        match self {
            Dataset::Departments => "departments",
            Dataset::Jobs => "jobs",
            Dataset::HiredEmployees => "hired_employees",
        }
    }

    /// Fixed source file name inside the data directory.
    pub fn file_name(self) -> String {
        format!("{}.csv", self.table())
    }

    /// Table columns, in the positional order of the source file.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Dataset::Departments => &["id", "name"],
            Dataset::Jobs => &["id", "title"],
            Dataset::HiredEmployees => &["id", "name", "hired_at", "department_id", "job_id"],
        }
    }
}

/// A hire record as supplied to the bulk inserter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HiredEmployee {
    pub id: i64,
    pub name: String,
    pub hired_at: String,
    pub department_id: Option<i64>,
    pub job_id: Option<i64>,
}

/// Wire form of a hire: `[id, name, hired_at, department_id, job_id]`.
pub type HiredTuple = (i64, String, String, Option<i64>, Option<i64>);

impl From<HiredTuple> for HiredEmployee {
    fn from((id, name, hired_at, department_id, job_id): HiredTuple) -> Self {
        Self {
            id,
            name,
            hired_at,
            department_id,
            job_id,
        }
    }
}

impl HiredEmployee {
    pub fn to_cells(&self) -> Vec<CellValue> {
        vec![
            CellValue::Integer(self.id),
            CellValue::Text(self.name.clone()),
            CellValue::Text(self.hired_at.clone()),
            self.department_id.into(),
            self.job_id.into(),
        ]
    }
}

/// A value bound into one column of an inserted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Integer(i64),
    Text(String),
    Null,
}

impl From<Option<i64>> for CellValue {
    fn from(value: Option<i64>) -> Self {
        value.map_or(CellValue::Null, CellValue::Integer)
    }
}

impl From<Option<String>> for CellValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(CellValue::Null, CellValue::Text)
    }
}

/// One column as reported by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescription {
    pub name: String,
    /// Declared SQL type (`INTEGER`, `TEXT`, ...); empty when undeclared.
    pub declared_type: String,
    pub not_null: bool,
    pub primary_key: bool,
}

impl ColumnDescription {
    /// Whether the column may hold NULL.
    ///
    /// SQLite lets a non-`INTEGER` primary key hold NULL, but every table here
    /// keys on `INTEGER PRIMARY KEY`, so keys are treated as non-null.
    pub fn nullable(&self) -> bool {
        !self.not_null && !self.primary_key
    }
}

/// Ordered column list of a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableDescription {
    pub table: String,
    pub columns: Vec<ColumnDescription>,
}

impl TableDescription {
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}
