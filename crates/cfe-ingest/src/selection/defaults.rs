//! Default axis, color-by and group-by selection for a freshly loaded dataset.

use crate::config::IngestConfig;
use crate::types::{DatasetDefaults, FeatureDef, NO_GROUPING};
use once_cell::sync::Lazy;
use regex::Regex;

// Well-known categorical metadata headers ("cell line" style) - compiled once
static GROUP_BY_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^cell[\s_-]?lines?$").expect("Invalid regex: cell line"),
        Regex::new(r"(?i)^cell[\s_-]?line[\s_-]?(id|name)$").expect("Invalid regex: cell line id"),
    ]
});

/// Check if a header names well-known categorical metadata.
pub fn is_well_known_group_by(column: &str) -> bool {
    GROUP_BY_PATTERNS.iter().any(|p| p.is_match(column))
}

/// Resolves the initial selection state for a dataset.
#[derive(Debug, Clone, Default)]
pub struct DefaultSelectionResolver {
    candidates: Vec<String>,
    thumbnail_root: Option<String>,
    download_root: Option<String>,
    volume_viewer_data_root: Option<String>,
}

impl DefaultSelectionResolver {
    pub fn from_config(config: &IngestConfig) -> Self {
        Self {
            candidates: config.group_by_candidates.clone(),
            thumbnail_root: config.thumbnail_root.clone(),
            download_root: config.download_root.clone(),
            volume_viewer_data_root: config.volume_viewer_data_root.clone(),
        }
    }

    /// Resolve defaults from feature definitions (in data order) and the
    /// source's column headers (in source order).
    ///
    /// - x axis: first feature, else empty
    /// - y axis: second feature, else the x axis
    /// - color by: third feature, else empty
    /// - group by: a well-known metadata column present in the source, else
    ///   the first discrete feature, else [`NO_GROUPING`]
    pub fn resolve(&self, feature_defs: &[FeatureDef], source_columns: &[String]) -> DatasetDefaults {
        let key_at = |i: usize| feature_defs.get(i).map(|d| d.key.clone());

        let default_x_axis = key_at(0).unwrap_or_default();
        let default_y_axis = key_at(1).unwrap_or_else(|| default_x_axis.clone());
        let default_color_by = key_at(2).unwrap_or_default();

        DatasetDefaults {
            default_x_axis,
            default_y_axis,
            default_color_by,
            default_group_by: self.resolve_group_by(feature_defs, source_columns),
            thumbnail_root: self.thumbnail_root.clone(),
            download_root: self.download_root.clone(),
            volume_viewer_data_root: self.volume_viewer_data_root.clone(),
        }
    }

    fn resolve_group_by(&self, feature_defs: &[FeatureDef], source_columns: &[String]) -> String {
        let present = |name: &str| source_columns.iter().any(|c| c == name);

        if let Some(candidate) = self.candidates.iter().find(|c| present(c)) {
            return candidate.clone();
        }

        if let Some(column) = source_columns.iter().find(|c| is_well_known_group_by(c)) {
            return column.clone();
        }

        feature_defs
            .iter()
            .find(|d| d.discrete)
            .map(|d| d.key.clone())
            .unwrap_or_else(|| NO_GROUPING.to_string())
    }
}
