use std::ops::Range;
use std::path::Path;

/// Rounds to a fixed number of decimals, with ties going to the even
/// neighbour (`round(202.125, 2) == 202.12`).
///
/// This is the "scale, round, unscale" approach, so it inherits the usual
/// float caveats for values that are not exactly representable.
///
/// ```
/// use photofrag::utils::round_to_decimals;
///
/// assert_eq!(round_to_decimals(0.123456, 2), 0.12);
/// assert_eq!(round_to_decimals(50.5, 0), 50.0);
/// assert_eq!(round_to_decimals(51.5, 0), 52.0);
/// ```
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round_ties_even() / scale
}

/// Finds the index range of the elements of a sorted slice whose keys
/// fall within `[lower, upper]` (both inclusive).
///
/// The slice has to be sorted by `key_fn`, otherwise the result is
/// meaningless (but it will not panic).
///
/// ```
/// use photofrag::utils::inclusive_range_by_key;
///
/// let grid = [0.0, 0.5, 1.0, 1.5, 2.0];
/// let range = inclusive_range_by_key(&grid, 0.5, 1.5, |x| *x);
/// assert_eq!(range, 1..4);
///
/// let empty = inclusive_range_by_key(&grid, 3.0, 4.0, |x| *x);
/// assert!(grid[empty].is_empty());
/// ```
pub fn inclusive_range_by_key<T, F>(slice: &[T], lower: f64, upper: f64, key_fn: F) -> Range<usize>
where
    F: Fn(&T) -> f64,
{
    let start_idx = slice.partition_point(|x| key_fn(x) < lower);
    let end_idx = start_idx + slice[start_idx..].partition_point(|x| key_fn(x) <= upper);

    start_idx..end_idx
}

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// File name of a path (lossy), or the whole path if it has none.
pub fn file_label(path: &Path) -> String {
    match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => path.display().to_string(),
    }
}
