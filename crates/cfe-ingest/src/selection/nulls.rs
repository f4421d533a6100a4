//! Cross-axis null synchronization for jointly plotted features.

use crate::error::{IngestError, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// X and Y values ready to plot together.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncedAxes {
    pub x_values: Vec<Option<f64>>,
    pub y_values: Vec<Option<f64>>,
}

impl SyncedAxes {
    /// True when no point can be drawn.
    pub fn is_empty(&self) -> bool {
        self.x_values.is_empty()
    }
}

/// Fail with `LengthMismatch` unless both axes have the same length.
pub fn check_lengths(x_values: &[Option<f64>], y_values: &[Option<f64>]) -> Result<()> {
    if x_values.len() != y_values.len() {
        return Err(IngestError::LengthMismatch {
            x_len: x_values.len(),
            y_len: y_values.len(),
        });
    }
    Ok(())
}

/// Make nulls agree across both axes.
///
/// A null on either side nulls the other side at the same index. When no
/// index keeps both values, both outputs are empty. Mismatched lengths are
/// logged and the inputs come back unchanged.
pub fn sync_null_values(x_values: &[Option<f64>], y_values: &[Option<f64>]) -> SyncedAxes {
    if let Err(e) = check_lengths(x_values, y_values) {
        warn!("Skipping null synchronization: {}", e);
        return SyncedAxes {
            x_values: x_values.to_vec(),
            y_values: y_values.to_vec(),
        };
    }

    let mut x_out = x_values.to_vec();
    let mut y_out = y_values.to_vec();
    let mut visible = 0usize;

    for (x, y) in x_out.iter_mut().zip(y_out.iter_mut()) {
        if x.is_none() {
            *y = None;
        } else if y.is_none() {
            *x = None;
        } else {
            visible += 1;
        }
    }

    if visible == 0 {
        return SyncedAxes::default();
    }

    SyncedAxes {
        x_values: x_out,
        y_values: y_out,
    }
}
