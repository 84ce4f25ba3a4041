//! Backup container format.
//!
//! A container is an Avro object container file: a header embedding the
//! writer schema and user metadata, then data blocks each closed by the
//! file's 16-byte sync marker. The schema is a flat record of non-null
//! `string` fields, one per table column, in column order. Two metadata
//! entries travel in the header:
//!
//! - `hiring_ledger.table`: the source table name
//! - `hiring_ledger.columns`: JSON column descriptions (declared type, nullability)
//!
//! A file cut short fails the sync-marker or block-length check on read.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use apache_avro::types::{Record, Value};
use apache_avro::{Reader, Schema, Writer};
use serde_json::json;

use crate::config::{CONTAINER_RECORD_NAME, METADATA_COLUMNS_KEY, METADATA_TABLE_KEY};
use crate::error_handling::ContainerError;
use crate::storage::{ColumnDescription, TableDescription};

/// Field layout of a container, derived from a table description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerSchema {
    pub table: String,
    pub columns: Vec<ColumnDescription>,
}

fn is_avro_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl ContainerSchema {
    /// One string field per described column.
    pub fn from_description(description: &TableDescription) -> Result<Self, ContainerError> {
        if let Some(bad) = description.columns.iter().find(|c| !is_avro_name(&c.name)) {
            return Err(ContainerError::InvalidFieldName(bad.name.clone()));
        }
        Ok(Self {
            table: description.table.clone(),
            columns: description.columns.clone(),
        })
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// The Avro record schema embedded in the container header.
    pub fn to_avro(&self) -> Result<Schema, ContainerError> {
        let fields: Vec<_> = self
            .columns
            .iter()
            .map(|c| json!({ "name": c.name, "type": "string" }))
            .collect();
        let schema = json!({
            "type": "record",
            "name": CONTAINER_RECORD_NAME,
            "fields": fields,
        });
        Ok(Schema::parse(&schema)?)
    }
}

/// A decoded row: column name to string value, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatRecord {
    fields: Vec<(String, String)>,
}

impl FlatRecord {
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    fn from_value(value: Value) -> Result<Self, ContainerError> {
        match value {
            Value::Record(fields) => {
                let fields = fields
                    .into_iter()
                    .map(|(name, v)| scalar_to_string(v).map(|s| (name, s)))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self { fields })
            }
            other => Err(ContainerError::UnexpectedValue(format!(
                "expected a record, found {other:?}"
            ))),
        }
    }
}

/// Flattens a scalar datum to its string form.
///
/// Containers written here only hold strings; the other scalars are accepted
/// so containers produced by other writers with the same layout still decode.
fn scalar_to_string(value: Value) -> Result<String, ContainerError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        Value::Boolean(b) => Ok(b.to_string()),
        Value::Int(i) => Ok(i.to_string()),
        Value::Long(l) => Ok(l.to_string()),
        Value::Float(f) => Ok(f.to_string()),
        Value::Double(d) => Ok(d.to_string()),
        Value::Bytes(b) => Ok(String::from_utf8_lossy(&b).into_owned()),
        Value::Union(_, inner) => scalar_to_string(*inner),
        other => Err(ContainerError::UnexpectedValue(format!(
            "non-scalar field {other:?}"
        ))),
    }
}

/// Contents of a container file.
#[derive(Debug, Clone)]
pub struct DecodedContainer {
    /// Table recorded in the header, if the writer recorded one.
    pub table: Option<String>,
    /// Column descriptions recorded in the header, if present.
    pub columns: Option<Vec<ColumnDescription>>,
    /// Records in write order.
    pub records: Vec<FlatRecord>,
}

/// Creates (or truncates) `path` and writes every row as one record.
///
/// Each row must hold one value per schema field, in field order.
/// Returns the number of records written.
pub fn write_container(
    path: &Path,
    schema: &ContainerSchema,
    rows: &[Vec<String>],
) -> Result<usize, ContainerError> {
    let avro_schema = schema.to_avro()?;
    let names = schema.field_names();

    let file = File::create(path)?;
    let mut writer = Writer::new(&avro_schema, BufWriter::new(file));
    writer.add_user_metadata(METADATA_TABLE_KEY.to_string(), schema.table.as_bytes())?;
    writer.add_user_metadata(
        METADATA_COLUMNS_KEY.to_string(),
        serde_json::to_vec(&schema.columns)?,
    )?;

    for row in rows {
        let mut record = Record::new(&avro_schema).ok_or_else(|| {
            ContainerError::UnexpectedValue("container schema is not a record".to_string())
        })?;
        for (name, value) in names.iter().zip(row) {
            record.put(name, value.as_str());
        }
        writer.append(record)?;
    }

    let mut inner = writer.into_inner()?;
    inner.flush()?;
    Ok(rows.len())
}

/// Reads every record of the container at `path`.
pub fn read_container(path: &Path) -> Result<DecodedContainer, ContainerError> {
    let file = File::open(path)?;
    let reader = Reader::new(BufReader::new(file))?;

    let metadata = reader.user_metadata();
    let table = metadata
        .get(METADATA_TABLE_KEY)
        .map(|bytes| String::from_utf8_lossy(bytes).into_owned());
    let columns = metadata
        .get(METADATA_COLUMNS_KEY)
        .map(|bytes| serde_json::from_slice::<Vec<ColumnDescription>>(bytes))
        .transpose()?;

    let mut records = Vec::new();
    for value in reader {
        records.push(FlatRecord::from_value(value?)?);
    }

    Ok(DecodedContainer {
        table,
        columns,
        records,
    })
}
