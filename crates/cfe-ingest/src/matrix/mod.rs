//! Canonical feature matrix built from a loaded table.

mod builder;

pub use builder::FeatureMatrixBuilder;

use crate::types::{CellFileInfo, DataForPlot, FeatureDef};
use serde::Serialize;
use std::collections::HashMap;

/// Feature definitions, plot data and per-cell file info for one dataset.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureMatrix {
    pub feature_defs: Vec<FeatureDef>,
    pub data: DataForPlot,
    pub file_info: Vec<CellFileInfo>,
    #[serde(skip)]
    cell_index: HashMap<String, usize>,
}

impl FeatureMatrix {
    pub(crate) fn new(
        feature_defs: Vec<FeatureDef>,
        data: DataForPlot,
        file_info: Vec<CellFileInfo>,
    ) -> Self {
        let mut cell_index = HashMap::with_capacity(file_info.len());
        for (row, info) in file_info.iter().enumerate() {
            // first occurrence wins for repeated ids
            cell_index.entry(info.cell_id.clone()).or_insert(row);
        }
        Self {
            feature_defs,
            data,
            file_info,
            cell_index,
        }
    }

    pub fn feature_def(&self, key: &str) -> Option<&FeatureDef> {
        self.feature_defs.iter().find(|d| d.key == key)
    }

    /// Row index of a cell id.
    pub fn row_of(&self, cell_id: &str) -> Option<usize> {
        self.cell_index.get(cell_id).copied()
    }

    pub fn file_info(&self, cell_id: &str) -> Option<&CellFileInfo> {
        self.row_of(cell_id).map(|row| &self.file_info[row])
    }

    /// File info for a selection of cells, in the order given. Unknown ids are skipped.
    pub fn file_info_for_ids<S: AsRef<str>>(&self, cell_ids: &[S]) -> Vec<&CellFileInfo> {
        cell_ids
            .iter()
            .filter_map(|id| self.file_info(id.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Labels;

    fn matrix(ids: &[&str]) -> FeatureMatrix {
        let file_info = ids
            .iter()
            .map(|id| CellFileInfo {
                cell_id: id.to_string(),
                ..Default::default()
            })
            .collect();
        let data = DataForPlot {
            indices: (0..ids.len()).collect(),
            values: Default::default(),
            labels: Labels {
                cell_ids: ids.iter().map(|s| s.to_string()).collect(),
                thumbnail_paths: vec![String::new(); ids.len()],
            },
        };
        FeatureMatrix::new(Vec::new(), data, file_info)
    }

    #[test]
    fn test_file_info_for_ids_keeps_request_order() {
        let m = matrix(&["a", "b", "c"]);
        let found: Vec<&str> = m
            .file_info_for_ids(&["c", "missing", "a"])
            .iter()
            .map(|i| i.cell_id.as_str())
            .collect();
        assert_eq!(found, vec!["c", "a"]);
    }

    #[test]
    fn test_repeated_cell_id_resolves_to_first_row() {
        let m = matrix(&["a", "b", "a"]);
        assert_eq!(m.row_of("a"), Some(0));
        assert_eq!(m.row_of("z"), None);
    }
}
