//! Dataset loading pipeline.
//!
//! [`DatasetLoader`] runs the stages in order:
//! 1. parse raw input into a [`crate::types::RawTable`]
//! 2. classify feature columns
//! 3. build the feature matrix
//! 4. resolve default selections
//!
//! [`DatasetStore`] keeps the result of the latest successful load.

mod loader;
mod store;

pub use loader::{DatasetLoader, LoadedDataset};
pub use store::DatasetStore;
