//! Selection helpers used once data is loaded:
//! - default axes and grouping ([`DefaultSelectionResolver`])
//! - null synchronization of two plotted axes ([`sync_null_values`])
//! - random pick of an initially selected point ([`find_visible_data_point`])

mod defaults;
mod nulls;
mod visible;

pub use defaults::{DefaultSelectionResolver, is_well_known_group_by};
pub use nulls::{SyncedAxes, check_lengths, sync_null_values};
pub use visible::{IndexSampler, find_visible_data_point, find_visible_data_point_with, is_visible};
