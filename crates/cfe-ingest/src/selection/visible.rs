//! Random pick of a point that is visible on both axes.

use rand::Rng;

/// Source of uniformly distributed indices.
pub trait IndexSampler {
    /// Uniform index in `0..len`. `len` is never zero.
    fn sample_index(&mut self, len: usize) -> usize;
}

impl<R: Rng + ?Sized> IndexSampler for R {
    fn sample_index(&mut self, len: usize) -> usize {
        self.gen_range(0..len)
    }
}

/// Pick a random index whose x and y values are both present.
///
/// Tries at most `length` draws and falls back to 0, which is not
/// guaranteed to be visible.
pub fn find_visible_data_point(
    length: usize,
    x_values: &[Option<f64>],
    y_values: &[Option<f64>],
) -> usize {
    find_visible_data_point_with(&mut rand::thread_rng(), length, x_values, y_values)
}

/// Same as [`find_visible_data_point`] with an explicit index source.
pub fn find_visible_data_point_with<S: IndexSampler + ?Sized>(
    sampler: &mut S,
    length: usize,
    x_values: &[Option<f64>],
    y_values: &[Option<f64>],
) -> usize {
    for _ in 0..length {
        let index = sampler.sample_index(length);
        if is_visible(index, x_values, y_values) {
            return index;
        }
    }
    0
}

/// True when both axes hold a value at `index`.
pub fn is_visible(index: usize, x_values: &[Option<f64>], y_values: &[Option<f64>]) -> bool {
    matches!(
        (x_values.get(index), y_values.get(index)),
        (Some(Some(_)), Some(Some(_)))
    )
}
