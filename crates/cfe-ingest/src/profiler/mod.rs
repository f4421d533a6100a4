//! Column profiling for loaded tables.
//!
//! This module decides, for every non-reserved column:
//! - whether it is continuous or discrete
//! - how discrete categories are encoded
//! - whether it carries any value at all (empty columns are dropped)

mod type_inference;

pub use type_inference::{classify, count_valid};

use crate::types::{FeatureColumnType, RawTable, ReservedColumns};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A feature column that survived profiling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedColumn {
    pub key: String,
    pub column_type: FeatureColumnType,
    pub valid_count: usize,
    pub missing_count: usize,
}

/// Profiler that turns raw columns into classified feature columns.
pub struct ColumnProfiler;

impl ColumnProfiler {
    /// Classify every feature column of a table, in source column order.
    ///
    /// Reserved columns are skipped. Columns without a single non-empty cell
    /// are dropped.
    pub fn classify_table(table: &RawTable, reserved: &ReservedColumns) -> Vec<ClassifiedColumn> {
        let mut classified = Vec::new();

        for (idx, name) in table.columns().iter().enumerate() {
            if reserved.contains(name) {
                debug!("Skipping reserved column '{}'", name);
                continue;
            }

            let values: Vec<&str> = table.rows().iter().map(|row| row[idx].as_str()).collect();
            let valid_count = count_valid(&values);
            if valid_count == 0 {
                debug!("Dropping column '{}' with no values", name);
                continue;
            }

            let column_type = classify(&values);
            debug!(
                "Column '{}': {} ({} valid of {})",
                name,
                if column_type.is_discrete() { "discrete" } else { "continuous" },
                valid_count,
                values.len()
            );

            classified.push(ClassifiedColumn {
                key: name.clone(),
                column_type,
                valid_count,
                missing_count: values.len() - valid_count,
            });
        }

        classified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_delimited;

    #[test]
    fn test_classify_table_skips_reserved_and_empty() {
        let table = parse_delimited(
            "CellId,thumbnailPath,volume,empty,structure\n\
             1,a.png,10,,tubulin\n\
             2,b.png,12,,actin\n",
            b',',
        )
        .unwrap();

        let classified = ColumnProfiler::classify_table(&table, &ReservedColumns::default());
        let keys: Vec<&str> = classified.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["volume", "structure"]);
        assert!(!classified[0].column_type.is_discrete());
        assert!(classified[1].column_type.is_discrete());
    }

    #[test]
    fn test_classify_table_counts_missing() {
        let table = parse_delimited("CellId,volume\n1,10\n2,\n3,NaN\n", b',').unwrap();
        let classified = ColumnProfiler::classify_table(&table, &ReservedColumns::default());
        assert_eq!(classified[0].valid_count, 2);
        assert_eq!(classified[0].missing_count, 1);
    }

    #[test]
    fn test_classify_table_custom_cell_id_is_reserved() {
        let table = parse_delimited("cell_id,volume\nx,1\n", b',').unwrap();
        let classified = ColumnProfiler::classify_table(&table, &ReservedColumns::new("cell_id"));
        assert_eq!(classified.len(), 1);
        assert_eq!(classified[0].key, "volume");
    }
}
