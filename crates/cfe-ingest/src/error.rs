//! Error types for feature-data ingestion.
//!
//! Load failures (`Parse`, `Csv`, `DuplicateColumn`, `MissingRequiredColumn`)
//! abort a dataset load and leave whatever was loaded before untouched.
//! `LengthMismatch` is recovered locally by the null synchronizer and only
//! ever logged.
//!
//! Errors are serializable so a UI collaborator can show them directly.

use serde::Serialize;
use serde::ser::SerializeStruct;
use thiserror::Error;

/// The main error type for the ingestion pipeline.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Raw input was empty or malformed.
    #[error("Could not parse dataset: {0}")]
    Parse(String),

    /// Two non-empty header cells carry the same name.
    #[error("Duplicate column '{0}' in header row")]
    DuplicateColumn(String),

    /// A required reserved column (the cell id) is absent.
    #[error("Required column '{0}' not found in dataset")]
    MissingRequiredColumn(String),

    /// Two axis arrays passed to the null synchronizer differ in length.
    #[error("Axis length mismatch: x has {x_len} values, y has {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Feature key is not part of the loaded dataset.
    #[error("Feature '{0}' not found in dataset")]
    FeatureNotFound(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV tokenizer error wrapper.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<IngestError>,
    },
}

impl IngestError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        IngestError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Get error code for frontend handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Parse(_) => "PARSE_ERROR",
            Self::DuplicateColumn(_) => "DUPLICATE_COLUMN",
            Self::MissingRequiredColumn(_) => "MISSING_REQUIRED_COLUMN",
            Self::LengthMismatch { .. } => "LENGTH_MISMATCH",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::FeatureNotFound(_) => "FEATURE_NOT_FOUND",
            Self::Io(_) => "IO_ERROR",
            Self::Csv(_) => "CSV_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error aborts a dataset load ("could not load dataset").
    pub fn is_load_error(&self) -> bool {
        match self {
            Self::Parse(_)
            | Self::DuplicateColumn(_)
            | Self::MissingRequiredColumn(_)
            | Self::Csv(_) => true,
            Self::WithContext { source, .. } => source.is_load_error(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for IngestError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("IngestError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| IngestError::Polars(e).with_context(context))
    }
}
