//! Assembly of the canonical per-cell feature matrix.

use super::FeatureMatrix;
use crate::error::{IngestError, Result};
use crate::profiler::ClassifiedColumn;
use crate::types::{
    CellFileInfo, DataForPlot, FeatureColumnType, FeatureDef, Labels, RawTable, ReservedColumn,
    ReservedColumns,
};
use crate::utils::parse_cell;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Builds a [`FeatureMatrix`] from a table and its classified columns.
pub struct FeatureMatrixBuilder<'a> {
    reserved: &'a ReservedColumns,
    synthesize_cell_ids: bool,
}

impl<'a> FeatureMatrixBuilder<'a> {
    pub fn new(reserved: &'a ReservedColumns) -> Self {
        Self {
            reserved,
            synthesize_cell_ids: false,
        }
    }

    /// Use the row index as cell id when the cell id column is absent.
    pub fn synthesize_cell_ids(mut self, synthesize: bool) -> Self {
        self.synthesize_cell_ids = synthesize;
        self
    }

    /// Build the matrix.
    ///
    /// Row order follows the table. Every value array and label array has one
    /// entry per row.
    pub fn build(&self, table: &RawTable, columns: &[ClassifiedColumn]) -> Result<FeatureMatrix> {
        let n = table.n_rows();
        let cell_ids = self.cell_ids(table)?;

        let thumbnail_paths = match self.reserved_column(table, ReservedColumn::ThumbnailPath) {
            Some(values) => values.into_iter().map(str::to_string).collect(),
            None => vec![String::new(); n],
        };

        let mut feature_defs = Vec::with_capacity(columns.len());
        let mut values = BTreeMap::new();

        for column in columns {
            if self.reserved.contains(&column.key) {
                debug!("Ignoring reserved column '{}' passed as feature", column.key);
                continue;
            }
            let cells = table
                .column_values(&column.key)
                .ok_or_else(|| IngestError::FeatureNotFound(column.key.clone()))?;

            let encoded = match &column.column_type {
                FeatureColumnType::Continuous => cells
                    .iter()
                    .map(|cell| parse_cell(cell).as_plot_value())
                    .collect(),
                FeatureColumnType::Discrete { options } => {
                    let codes: HashMap<&str, u32> = options
                        .iter()
                        .map(|(code, option)| (option.key.as_str(), *code))
                        .collect();
                    encode_discrete(&column.key, &cells, &codes)
                }
            };

            values.insert(column.key.clone(), encoded);
            feature_defs.push(FeatureDef::new(column.key.clone(), &column.column_type));
        }

        let file_info = self.file_info(table, &cell_ids);

        let data = DataForPlot {
            indices: (0..n).collect(),
            values,
            labels: Labels {
                cell_ids,
                thumbnail_paths,
            },
        };
        debug_assert!(data.is_consistent());

        Ok(FeatureMatrix::new(feature_defs, data, file_info))
    }

    fn cell_ids(&self, table: &RawTable) -> Result<Vec<String>> {
        match self.reserved_column(table, ReservedColumn::CellId) {
            Some(values) => Ok(values.into_iter().map(str::to_string).collect()),
            None if self.synthesize_cell_ids => {
                debug!("No cell id column, using row indices");
                Ok((0..table.n_rows()).map(|i| i.to_string()).collect())
            }
            None => Err(IngestError::MissingRequiredColumn(
                self.reserved.header(ReservedColumn::CellId).to_string(),
            )),
        }
    }

    fn reserved_column<'t>(
        &self,
        table: &'t RawTable,
        column: ReservedColumn,
    ) -> Option<Vec<&'t str>> {
        table.column_values(self.reserved.header(column))
    }

    fn file_info(&self, table: &RawTable, cell_ids: &[String]) -> Vec<CellFileInfo> {
        let optional = |column: ReservedColumn, row: usize| -> Option<String> {
            table
                .cell(row, self.reserved.header(column))
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        cell_ids
            .iter()
            .enumerate()
            .map(|(row, cell_id)| CellFileInfo {
                cell_id: cell_id.clone(),
                fov_id: optional(ReservedColumn::FovId, row),
                thumbnail_path: optional(ReservedColumn::ThumbnailPath, row),
                volume_viewer_path: optional(ReservedColumn::VolumeViewerPath, row),
                fov_thumbnail_path: optional(ReservedColumn::FovThumbnailPath, row),
                fov_volume_viewer_path: optional(ReservedColumn::FovVolumeViewerPath, row),
                transform: optional(ReservedColumn::Transform, row),
            })
            .collect()
    }
}

fn encode_discrete(key: &str, cells: &[&str], codes: &HashMap<&str, u32>) -> Vec<Option<f64>> {
    let mut unknown = 0usize;
    let encoded = cells
        .iter()
        .map(|cell| {
            if cell.is_empty() {
                return None;
            }
            let code = codes.get(cell).map(|&c| f64::from(c));
            if code.is_none() {
                unknown += 1;
            }
            code
        })
        .collect();

    if unknown > 0 {
        warn!(
            "Column '{}' has {} values outside its category encoding",
            key, unknown
        );
    }
    encoded
}
