use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::config::IngestConfig;

/// Group-by value meaning "do not partition points".
pub const NO_GROUPING: &str = "none";

// ============================================================================
// Raw input
// ============================================================================

/// Row-oriented table of trimmed string cells.
///
/// Column names are unique and non-empty, every row has exactly one cell per
/// column, and no row is entirely empty. Tables are only produced by the
/// constructors in [`crate::parser`], which enforce this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub(crate) columns: Vec<String>,
    pub(crate) rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Column names in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// All cells of one column, top to bottom.
    pub fn column_values(&self, name: &str) -> Option<Vec<&str>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&str> {
        let idx = self.column_index(column)?;
        self.rows.get(row).map(|r| r[idx].as_str())
    }
}

// ============================================================================
// Reserved (metadata) columns
// ============================================================================

/// Columns with a fixed semantic role; never plotted as features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReservedColumn {
    CellId,
    FovId,
    ThumbnailPath,
    VolumeViewerPath,
    FovThumbnailPath,
    FovVolumeViewerPath,
    Transform,
}

impl ReservedColumn {
    pub const ALL: [ReservedColumn; 7] = [
        ReservedColumn::CellId,
        ReservedColumn::FovId,
        ReservedColumn::ThumbnailPath,
        ReservedColumn::VolumeViewerPath,
        ReservedColumn::FovThumbnailPath,
        ReservedColumn::FovVolumeViewerPath,
        ReservedColumn::Transform,
    ];

    /// Canonical header name of this column.
    pub fn default_header(self) -> &'static str {
        match self {
            ReservedColumn::CellId => crate::config::DEFAULT_CELL_ID_COLUMN,
            ReservedColumn::FovId => "FOVId",
            ReservedColumn::ThumbnailPath => "thumbnailPath",
            ReservedColumn::VolumeViewerPath => "volumeviewerPath",
            ReservedColumn::FovThumbnailPath => "fovThumbnailPath",
            ReservedColumn::FovVolumeViewerPath => "fovVolumeviewerPath",
            ReservedColumn::Transform => "transform",
        }
    }
}

/// The set of reserved headers for one load, with the configured cell id header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReservedColumns {
    cell_id: String,
}

impl ReservedColumns {
    pub fn new(cell_id_column: impl Into<String>) -> Self {
        Self {
            cell_id: cell_id_column.into(),
        }
    }

    pub fn from_config(config: &IngestConfig) -> Self {
        Self::new(config.cell_id_column.clone())
    }

    pub fn header(&self, column: ReservedColumn) -> &str {
        match column {
            ReservedColumn::CellId => &self.cell_id,
            other => other.default_header(),
        }
    }

    /// Which reserved role a header plays, if any.
    pub fn kind_of(&self, name: &str) -> Option<ReservedColumn> {
        ReservedColumn::ALL
            .into_iter()
            .find(|&c| self.header(c) == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.kind_of(name).is_some()
    }
}

impl Default for ReservedColumns {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_CELL_ID_COLUMN)
    }
}

// ============================================================================
// Feature classification
// ============================================================================

/// One category of a discrete feature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscreteOption {
    pub name: String,
    pub key: String,
    pub count: usize,
}

/// Whether a feature column is continuous or categorical.
///
/// Discrete options are keyed by their integer encoding, which follows the
/// first-seen order of each raw value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FeatureColumnType {
    Continuous,
    Discrete {
        options: BTreeMap<u32, DiscreteOption>,
    },
}

impl FeatureColumnType {
    pub fn is_discrete(&self) -> bool {
        matches!(self, FeatureColumnType::Discrete { .. })
    }

    pub fn options(&self) -> Option<&BTreeMap<u32, DiscreteOption>> {
        match self {
            FeatureColumnType::Continuous => None,
            FeatureColumnType::Discrete { options } => Some(options),
        }
    }
}

/// A plottable feature as exposed to axis selectors and legends.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureDef {
    pub key: String,
    pub display_name: String,
    pub discrete: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<BTreeMap<u32, DiscreteOption>>,
}

impl FeatureDef {
    pub fn new(key: impl Into<String>, column_type: &FeatureColumnType) -> Self {
        let key = key.into();
        Self {
            display_name: key.clone(),
            key,
            discrete: column_type.is_discrete(),
            options: column_type.options().cloned(),
        }
    }

    /// Category name for an encoded discrete value.
    pub fn decode(&self, value: f64) -> Option<&str> {
        if !self.discrete || value.is_nan() || value < 0.0 || value.fract() != 0.0 {
            return None;
        }
        self.options
            .as_ref()?
            .get(&(value as u32))
            .map(|opt| opt.name.as_str())
    }
}

// ============================================================================
// Canonical plot data
// ============================================================================

/// Per-row labels shown next to plotted points.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Labels {
    pub cell_ids: Vec<String>,
    pub thumbnail_paths: Vec<String>,
}

/// Columnar per-cell feature matrix.
///
/// `values` holds `None` for absent cells and `Some(f64::NAN)` for the
/// literal NaN token. Discrete features hold their integer encoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataForPlot {
    pub indices: Vec<usize>,
    pub values: BTreeMap<String, Vec<Option<f64>>>,
    pub labels: Labels,
}

impl DataForPlot {
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn values_for(&self, key: &str) -> Option<&[Option<f64>]> {
        self.values.get(key).map(Vec::as_slice)
    }

    /// True when every array matches `indices` in length and `indices[i] == i`.
    pub fn is_consistent(&self) -> bool {
        let n = self.len();
        self.indices.iter().enumerate().all(|(i, &idx)| i == idx)
            && self.values.values().all(|v| v.len() == n)
            && self.labels.cell_ids.len() == n
            && self.labels.thumbnail_paths.len() == n
    }
}

/// Reserved-column metadata for one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CellFileInfo {
    pub cell_id: String,
    pub fov_id: Option<String>,
    pub thumbnail_path: Option<String>,
    pub volume_viewer_path: Option<String>,
    pub fov_thumbnail_path: Option<String>,
    pub fov_volume_viewer_path: Option<String>,
    pub transform: Option<String>,
}

/// Selection state seeded into the UI when a dataset is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDefaults {
    pub default_x_axis: String,
    pub default_y_axis: String,
    pub default_color_by: String,
    pub default_group_by: String,
    pub thumbnail_root: Option<String>,
    pub download_root: Option<String>,
    pub volume_viewer_data_root: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn discrete(names: &[(&str, usize)]) -> FeatureColumnType {
        let options = names
            .iter()
            .enumerate()
            .map(|(i, (name, count))| {
                (
                    i as u32,
                    DiscreteOption {
                        name: name.to_string(),
                        key: name.to_string(),
                        count: *count,
                    },
                )
            })
            .collect();
        FeatureColumnType::Discrete { options }
    }

    #[test]
    fn test_reserved_columns_default_headers() {
        let reserved = ReservedColumns::default();
        assert!(reserved.contains("CellId"));
        assert!(reserved.contains("thumbnailPath"));
        assert!(reserved.contains("FOVId"));
        assert!(!reserved.contains("cellid"));
        assert!(!reserved.contains("feature1"));
        assert_eq!(
            reserved.kind_of("volumeviewerPath"),
            Some(ReservedColumn::VolumeViewerPath)
        );
    }

    #[test]
    fn test_reserved_columns_custom_cell_id() {
        let reserved = ReservedColumns::new("cell_id");
        assert!(reserved.contains("cell_id"));
        assert!(!reserved.contains("CellId"));
        assert_eq!(reserved.header(ReservedColumn::CellId), "cell_id");
    }

    #[test]
    fn test_feature_def_decode() {
        let def = FeatureDef::new("structure", &discrete(&[("A", 1), ("B", 2)]));
        assert!(def.discrete);
        assert_eq!(def.decode(0.0), Some("A"));
        assert_eq!(def.decode(1.0), Some("B"));
        assert_eq!(def.decode(2.0), None);
        assert_eq!(def.decode(0.5), None);
        assert_eq!(def.decode(f64::NAN), None);
    }

    #[test]
    fn test_feature_def_continuous_has_no_options() {
        let def = FeatureDef::new("volume", &FeatureColumnType::Continuous);
        assert!(!def.discrete);
        assert_eq!(def.options, None);
        assert_eq!(def.decode(0.0), None);
    }

    #[test]
    fn test_feature_def_serializes_camel_case() {
        let def = FeatureDef::new("structure", &discrete(&[("A", 1)]));
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["displayName"], "structure");
        assert_eq!(json["options"]["0"]["name"], "A");
        assert_eq!(json["options"]["0"]["count"], 1);
    }

    #[test]
    fn test_data_for_plot_consistency() {
        let mut data = DataForPlot {
            indices: vec![0, 1],
            values: BTreeMap::from([("a".to_string(), vec![Some(1.0), None])]),
            labels: Labels {
                cell_ids: vec!["1".into(), "2".into()],
                thumbnail_paths: vec![String::new(), String::new()],
            },
        };
        assert!(data.is_consistent());
        data.values.insert("b".into(), vec![Some(1.0)]);
        assert!(!data.is_consistent());
    }
}
