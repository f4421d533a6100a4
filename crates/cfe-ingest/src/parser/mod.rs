//! Raw input parsing.
//!
//! Every entry point (delimited text, JSON payloads, polars frames) ends in
//! [`normalize`], so all of them share the same rules:
//! - header names and cells are trimmed
//! - columns with an empty header are dropped together with their cells
//! - duplicate headers are rejected
//! - rows whose cells are all empty are dropped
//! - at least one data row must remain
//!
//! No type coercion happens here; cells stay strings.

mod frame;
mod json;

use crate::error::{IngestError, Result};
use crate::types::RawTable;
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

/// Parse delimited text (header row first) into a [`RawTable`].
pub fn parse_delimited(text: &str, delimiter: u8) -> Result<RawTable> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    // the csv reader skips blank lines, which would promote the first data row
    if !text.is_empty() && text.lines().next().is_some_and(|l| l.trim().is_empty()) {
        return Err(IngestError::Parse("header row is empty".to_string()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => return Err(IngestError::Parse("missing header row".to_string())),
    };

    let mut rows = Vec::new();
    for record in records {
        rows.push(record?.iter().map(str::to_string).collect());
    }

    normalize(headers, rows)
}

/// Read and parse a delimited text file.
pub fn read_delimited_file(path: &Path, delimiter: u8) -> Result<RawTable> {
    let bytes = std::fs::read(path)?;
    let content = String::from_utf8(bytes)
        .map_err(|_| IngestError::Parse("input is not valid UTF-8".to_string()))?;
    parse_delimited(&content, delimiter)
}

/// Apply the shared table rules to a header row and raw rows.
///
/// Rows shorter than the header are padded with empty cells; cells beyond the
/// header are ignored.
pub(crate) fn normalize(headers: Vec<String>, rows: Vec<Vec<String>>) -> Result<RawTable> {
    if headers.is_empty() {
        return Err(IngestError::Parse("missing header row".to_string()));
    }

    let mut kept: Vec<(usize, String)> = Vec::with_capacity(headers.len());
    let mut seen = HashSet::new();
    for (idx, header) in headers.iter().enumerate() {
        let name = header.trim();
        if name.is_empty() {
            debug!("Dropping column {} with empty header", idx);
            continue;
        }
        if !seen.insert(name.to_string()) {
            return Err(IngestError::DuplicateColumn(name.to_string()));
        }
        kept.push((idx, name.to_string()));
    }

    if kept.is_empty() {
        return Err(IngestError::Parse("header row is empty".to_string()));
    }

    let total_rows = rows.len();
    let rows: Vec<Vec<String>> = rows
        .into_iter()
        .map(|row| {
            kept.iter()
                .map(|(idx, _)| row.get(*idx).map(|c| c.trim()).unwrap_or("").to_string())
                .collect::<Vec<String>>()
        })
        .filter(|cells| cells.iter().any(|c| !c.is_empty()))
        .collect();

    if rows.len() < total_rows {
        debug!("Dropped {} empty rows", total_rows - rows.len());
    }

    if rows.is_empty() {
        return Err(IngestError::Parse("no data rows".to_string()));
    }

    Ok(RawTable {
        columns: kept.into_iter().map(|(_, name)| name).collect(),
        rows,
    })
}
