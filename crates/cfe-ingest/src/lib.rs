//! Feature-Data Ingestion for the Cell Feature Explorer
//!
//! Turns heterogeneous tabular input into one canonical columnar model that
//! plotting, legend and axis-selector collaborators consume.
//!
//! # Overview
//!
//! - **Parsing**: delimited text, JSON payloads and polars frames become a
//!   trimmed [`RawTable`]
//! - **Classification**: each column is continuous or discrete; discrete
//!   categories get a stable first-seen integer encoding
//! - **Matrix building**: per-feature value arrays, cell labels and per-cell
//!   file info, with reserved metadata columns kept out of the feature set
//! - **Defaults**: initial x/y axes, color-by and group-by
//! - **Plot helpers**: cross-axis null synchronization and random selection
//!   of a visible point
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use cfe_ingest::{DatasetLoader, DatasetStore, IngestConfig};
//!
//! let loader = DatasetLoader::new(IngestConfig::default())?;
//! let store = DatasetStore::new();
//!
//! // A failed load keeps whatever was loaded before
//! let dataset = store.replace_with(loader.load_csv("upload", &text))?;
//!
//! let x = &dataset.defaults.default_x_axis;
//! let y = &dataset.defaults.default_y_axis;
//! let axes = dataset.plot_axes(x, y)?;
//! let selected = dataset.initial_selection(x, y)?;
//! ```

pub mod config;
pub mod error;
pub mod matrix;
pub mod parser;
pub mod pipeline;
pub mod profiler;
pub mod selection;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, IngestConfig, IngestConfigBuilder};
pub use error::{IngestError, Result as IngestResult, ResultExt};
pub use matrix::{FeatureMatrix, FeatureMatrixBuilder};
pub use parser::{parse_delimited, read_delimited_file};
pub use pipeline::{DatasetLoader, DatasetStore, LoadedDataset};
pub use profiler::{ClassifiedColumn, ColumnProfiler, classify};
pub use selection::{
    DefaultSelectionResolver, IndexSampler, SyncedAxes, find_visible_data_point,
    find_visible_data_point_with, sync_null_values,
};
pub use types::{
    CellFileInfo, DataForPlot, DatasetDefaults, DiscreteOption, FeatureColumnType, FeatureDef,
    Labels, NO_GROUPING, RawTable, ReservedColumn, ReservedColumns,
};
pub use utils::{CellValue, parse_cell};
