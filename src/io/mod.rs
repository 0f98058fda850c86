//! Ingestion adapters: decoding uploaded files into datasets.
//!
//! Adapters are the crate's only fallible, I/O-performing surface. Each one
//! produces an ordered column list plus dynamically typed rows and hands
//! them to [`Dataset::new`], which computes column statistics once. The
//! analytics core trusts the adapter-validated shape from then on.

use crate::dataset::{Dataset, Row};
use crate::error::{Error, Result};
use crate::value::Value;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Read a CSV file into a dataset, the header row supplying the column
/// list. The dataset is named after the file stem.
pub fn read_csv<P: AsRef<Path>>(path: P) -> Result<Dataset> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "dataset".to_string());
    let file = File::open(path)?;
    read_csv_from_reader(file, name)
}

/// Read CSV from any reader. Fields are dynamically typed: a field that
/// parses as a finite number becomes a number, `true`/`false` become
/// booleans, the empty field becomes null, anything else stays text. Empty
/// lines are skipped by the underlying reader.
pub fn read_csv_from_reader<R: Read>(reader: R, name: impl Into<String>) -> Result<Dataset> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows: Vec<Row> = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let row: Row = columns
            .iter()
            .zip(record.iter())
            .map(|(col, field)| (col.clone(), parse_field(field)))
            .collect();
        rows.push(row);
    }

    debug!("csv ingestion: {} rows, {} columns", rows.len(), columns.len());
    Ok(Dataset::new(name, rows, columns))
}

/// Parse a JSON array of flat records into a dataset. The first record's
/// key order supplies the column list (the decoded-spreadsheet shape the
/// upstream app produces). Nested values are rejected at ingestion; the
/// analytics core only handles scalars.
pub fn from_json_records(json: &str, name: impl Into<String>) -> Result<Dataset> {
    let records: Vec<serde_json::Map<String, serde_json::Value>> = serde_json::from_str(json)?;

    let columns: Vec<String> = records
        .first()
        .map(|rec| rec.keys().cloned().collect())
        .unwrap_or_default();

    let mut rows: Vec<Row> = Vec::with_capacity(records.len());
    for record in &records {
        let mut row = Row::new();
        for (key, value) in record {
            row.insert(key.clone(), convert_json_value(key, value)?);
        }
        rows.push(row);
    }

    debug!(
        "json ingestion: {} rows, {} columns",
        rows.len(),
        columns.len()
    );
    Ok(Dataset::new(name, rows, columns))
}

fn parse_field(field: &str) -> Value {
    if field.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = field.trim().parse::<f64>() {
        if n.is_finite() {
            return Value::Number(n);
        }
    }
    match field {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Text(field.to_string()),
    }
}

fn convert_json_value(key: &str, value: &serde_json::Value) -> Result<Value> {
    match value {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(*b)),
        serde_json::Value::Number(n) => Ok(n
            .as_f64()
            .map(Value::Number)
            .unwrap_or_else(|| Value::Text(n.to_string()))),
        serde_json::Value::String(s) => Ok(Value::Text(s.clone())),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(Error::InvalidValue(
            format!("column '{}' holds a nested value; only scalars are supported", key),
        )),
    }
}
