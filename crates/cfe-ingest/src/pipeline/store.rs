//! Holder of the currently loaded dataset.

use super::LoadedDataset;
use crate::error::Result;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// The dataset currently shown, replaced wholesale on every successful load.
///
/// A failed load leaves the previous dataset in place.
#[derive(Debug, Default)]
pub struct DatasetStore {
    current: RwLock<Option<Arc<LoadedDataset>>>,
}

static_assertions::assert_impl_all!(DatasetStore: Send, Sync);

impl DatasetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<Arc<LoadedDataset>> {
        self.current.read().clone()
    }

    /// Install the outcome of a load attempt. Last load wins.
    pub fn replace_with(&self, outcome: Result<LoadedDataset>) -> Result<Arc<LoadedDataset>> {
        match outcome {
            Ok(dataset) => {
                let dataset = Arc::new(dataset);
                let previous = self.current.write().replace(Arc::clone(&dataset));
                if let Some(previous) = previous {
                    info!("Replaced dataset '{}' with '{}'", previous.id, dataset.id);
                }
                Ok(dataset)
            }
            Err(e) => {
                warn!("Dataset load failed, keeping current dataset: {}", e);
                Err(e)
            }
        }
    }

    pub fn clear(&self) {
        self.current.write().take();
    }
}
