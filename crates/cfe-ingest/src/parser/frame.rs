//! Columnar payloads already loaded into a polars `DataFrame`.

use super::normalize;
use crate::error::{Result, ResultExt};
use crate::types::RawTable;
use polars::prelude::*;

impl RawTable {
    /// Create a RawTable by stringifying every column of a DataFrame.
    ///
    /// Nulls become empty cells, so they read as missing downstream.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self> {
        let mut headers = Vec::with_capacity(df.width());
        let mut columns: Vec<Vec<String>> = Vec::with_capacity(df.width());

        for col in df.get_columns() {
            let series = col.as_materialized_series();
            let name = series.name().to_string();
            let strings = series
                .cast(&DataType::String)
                .context(format!("Stringifying column '{}'", name))?;
            let values = strings
                .str()
                .context(format!("Reading column '{}'", name))?
                .into_iter()
                .map(|v| v.unwrap_or("").to_string())
                .collect();
            headers.push(name);
            columns.push(values);
        }

        let rows = (0..df.height())
            .map(|i| columns.iter().map(|c| c[i].clone()).collect())
            .collect();

        normalize(headers, rows)
    }
}
