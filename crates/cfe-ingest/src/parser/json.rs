//! JSON payloads from the document-store and static-JSON backends.

use super::normalize;
use crate::error::{IngestError, Result};
use crate::types::RawTable;
use serde_json::{Map, Value};

impl RawTable {
    /// Create a RawTable from a fetched JSON payload.
    ///
    /// Accepts either an array of record objects (headers are the union of
    /// keys in first-seen order) or an object of equal-length column arrays.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::Array(records) => from_records(records),
            Value::Object(columns) => from_columns(columns),
            _ => Err(IngestError::Parse(
                "JSON payload must be an array of records or an object of columns".to_string(),
            )),
        }
    }
}

fn from_records(records: &[Value]) -> Result<RawTable> {
    let mut headers: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());

    for record in records {
        let obj = record
            .as_object()
            .ok_or_else(|| IngestError::Parse("Items in array must be objects".to_string()))?;
        for key in obj.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let mut rows = Vec::with_capacity(objects.len());
    for obj in objects {
        let mut row = Vec::with_capacity(headers.len());
        for header in &headers {
            row.push(cell_text(header, obj.get(header))?);
        }
        rows.push(row);
    }

    normalize(headers, rows)
}

fn from_columns(columns: &Map<String, Value>) -> Result<RawTable> {
    let mut headers = Vec::with_capacity(columns.len());
    let mut cells: Vec<&Vec<Value>> = Vec::with_capacity(columns.len());

    for (name, values) in columns {
        let values = values.as_array().ok_or_else(|| {
            IngestError::Parse(format!("Column '{}' must be an array of values", name))
        })?;
        headers.push(name.clone());
        cells.push(values);
    }

    let n_rows = cells.first().map_or(0, |c| c.len());
    if let Some((name, col)) = headers.iter().zip(&cells).find(|(_, c)| c.len() != n_rows) {
        return Err(IngestError::Parse(format!(
            "Column '{}' has {} values, expected {}",
            name,
            col.len(),
            n_rows
        )));
    }

    let mut rows = Vec::with_capacity(n_rows);
    for i in 0..n_rows {
        let mut row = Vec::with_capacity(headers.len());
        for (header, col) in headers.iter().zip(&cells) {
            row.push(cell_text(header, col.get(i))?);
        }
        rows.push(row);
    }

    normalize(headers, rows)
}

fn cell_text(field: &str, value: Option<&Value>) -> Result<String> {
    match value {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) => Ok(n.to_string()),
        Some(Value::Bool(b)) => Ok(b.to_string()),
        Some(Value::Null) | None => Ok(String::new()),
        Some(_) => Err(IngestError::Parse(format!(
            "Unsupported value type for field '{}'",
            field
        ))),
    }
}
