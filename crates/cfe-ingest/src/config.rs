//! Configuration types for dataset ingestion.
//!
//! This module provides configuration options using the builder pattern.

use serde::{Deserialize, Serialize};

/// Default header of the cell identifier column.
pub const DEFAULT_CELL_ID_COLUMN: &str = "CellId";

/// Configuration for loading a dataset.
///
/// Use [`IngestConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use cfe_ingest::config::IngestConfig;
///
/// let config = IngestConfig::builder()
///     .delimiter(b'\t')
///     .cell_id_column("cell_id")
///     .thumbnail_root("https://example.org/thumbnails")
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Field delimiter of uploaded delimited text.
    /// Default: b','
    pub delimiter: u8,

    /// Header of the column holding cell identifiers.
    /// Default: "CellId"
    pub cell_id_column: String,

    /// Use the row index as cell id when the cell id column is absent.
    /// When false, a missing cell id column fails the load.
    /// Default: false
    pub synthesize_cell_ids: bool,

    /// Additional columns to prefer as the default group-by, checked in
    /// order before the built-in "cell line" patterns.
    /// Default: empty
    pub group_by_candidates: Vec<String>,

    /// Root URL or path that thumbnail paths are relative to.
    pub thumbnail_root: Option<String>,

    /// Root URL or path for raw data downloads.
    pub download_root: Option<String>,

    /// Root URL or path the 3D viewer loads volumes from.
    pub volume_viewer_data_root: Option<String>,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            cell_id_column: DEFAULT_CELL_ID_COLUMN.to_string(),
            synthesize_cell_ids: false,
            group_by_candidates: Vec::new(),
            thumbnail_root: None,
            download_root: None,
            volume_viewer_data_root: None,
        }
    }
}

impl IngestConfig {
    /// Create a new configuration builder.
    pub fn builder() -> IngestConfigBuilder {
        IngestConfigBuilder::default()
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let d = self.delimiter;
        if !d.is_ascii() || d.is_ascii_alphanumeric() || matches!(d, b'"' | b'\n' | b'\r') {
            return Err(ConfigValidationError::InvalidDelimiter(d as char));
        }

        if self.cell_id_column.trim().is_empty() {
            return Err(ConfigValidationError::EmptyColumnName(
                "cell_id_column".to_string(),
            ));
        }

        if self.group_by_candidates.iter().any(|c| c.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyColumnName(
                "group_by_candidates".to_string(),
            ));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid delimiter {0:?} (must be ASCII punctuation or whitespace, not a quote)")]
    InvalidDelimiter(char),

    #[error("Column name for '{0}' must not be empty")]
    EmptyColumnName(String),
}

/// Builder for [`IngestConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct IngestConfigBuilder {
    delimiter: Option<u8>,
    cell_id_column: Option<String>,
    synthesize_cell_ids: Option<bool>,
    group_by_candidates: Vec<String>,
    thumbnail_root: Option<String>,
    download_root: Option<String>,
    volume_viewer_data_root: Option<String>,
}

impl IngestConfigBuilder {
    /// Set the field delimiter (e.g. `b','` or `b'\t'`).
    pub fn delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Set the header of the cell id column.
    pub fn cell_id_column(mut self, column: impl Into<String>) -> Self {
        self.cell_id_column = Some(column.into());
        self
    }

    /// Fall back to row-index cell ids when the cell id column is absent.
    pub fn synthesize_cell_ids(mut self, synthesize: bool) -> Self {
        self.synthesize_cell_ids = Some(synthesize);
        self
    }

    /// Add a column to prefer as the default group-by.
    pub fn group_by_candidate(mut self, column: impl Into<String>) -> Self {
        self.group_by_candidates.push(column.into());
        self
    }

    pub fn thumbnail_root(mut self, root: impl Into<String>) -> Self {
        self.thumbnail_root = Some(root.into());
        self
    }

    pub fn download_root(mut self, root: impl Into<String>) -> Self {
        self.download_root = Some(root.into());
        self
    }

    pub fn volume_viewer_data_root(mut self, root: impl Into<String>) -> Self {
        self.volume_viewer_data_root = Some(root.into());
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `IngestConfig` or an error if validation fails.
    pub fn build(self) -> Result<IngestConfig, ConfigValidationError> {
        let config = IngestConfig {
            delimiter: self.delimiter.unwrap_or(b','),
            cell_id_column: self
                .cell_id_column
                .unwrap_or_else(|| DEFAULT_CELL_ID_COLUMN.to_string()),
            synthesize_cell_ids: self.synthesize_cell_ids.unwrap_or(false),
            group_by_candidates: self.group_by_candidates,
            thumbnail_root: self.thumbnail_root,
            download_root: self.download_root,
            volume_viewer_data_root: self.volume_viewer_data_root,
        };

        config.validate()?;
        Ok(config)
    }
}
