use crate::errors::{
    PhotofragError,
    Result,
};
use crate::models::MassWindow;
use crate::utils::{
    inclusive_range_by_key,
    round_to_decimals,
};
use std::ops::Range;

/// Grid spacing used when computing efficiencies.
pub const EFFICIENCY_GRID_STEP: f64 = 0.01;
/// Coarser spacing used when exporting averaged spectra.
pub const RAW_EXPORT_GRID_STEP: f64 = 0.02;
/// The grid extends this many m/z units past the parent ion.
pub const GRID_MZ_PADDING: f64 = 50.0;
/// Upper bound on the grid size, m/z 500k at the default step.
pub const MAX_GRID_POINTS: usize = 50_000_000;

/// Shared m/z axis every scan gets interpolated onto.
///
/// Built like a `linspace`: the number of points is
/// `round((max - min) / step) + 1`, spread evenly over `[min, max]` with both
/// ends included, and every value rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq)]
pub struct MzGrid {
    values: Vec<f64>,
    step: f64,
}

impl MzGrid {
    pub fn try_new(min_mz: f64, max_mz: f64, step: f64) -> Result<Self> {
        if !step.is_finite() || step <= 0.0 {
            return Err(PhotofragError::InvalidGrid {
                reason: format!("step must be a positive number, got {}", step),
            });
        }
        if !min_mz.is_finite() || !max_mz.is_finite() || max_mz < min_mz {
            return Err(PhotofragError::InvalidGrid {
                reason: format!("invalid m/z range [{}, {}]", min_mz, max_mz),
            });
        }

        // Rounded, a quotient like 5401.999... still means 5402 steps.
        let num_steps = ((max_mz - min_mz) / step).round();
        if num_steps >= MAX_GRID_POINTS as f64 {
            return Err(PhotofragError::InvalidGrid {
                reason: format!(
                    "[{}, {}] in steps of {} needs more than {} points",
                    min_mz, max_mz, step, MAX_GRID_POINTS
                ),
            });
        }
        let num_points = num_steps as usize + 1;
        let values = match num_points {
            0 | 1 => vec![round_to_decimals(min_mz, 2)],
            n => {
                let delta = (max_mz - min_mz) / (n - 1) as f64;
                let mut values: Vec<f64> = (0..n)
                    .map(|i| round_to_decimals(min_mz + i as f64 * delta, 2))
                    .collect();
                // Avoid accumulated error on the last point.
                values[n - 1] = round_to_decimals(max_mz, 2);
                values
            }
        };

        Ok(Self { values, step })
    }

    /// Grid from 0 to `parent_mz + 50`.
    pub fn for_parent(parent_mz: f64, step: f64) -> Result<Self> {
        Self::try_new(0.0, parent_mz + GRID_MZ_PADDING, step)
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Index range of the grid points inside a window, with the window
    /// bounds rounded to 2 decimals first.
    pub fn window_range(&self, window: &MassWindow) -> Range<usize> {
        let (lower, upper) = window.rounded_bounds();
        inclusive_range_by_key(&self.values, lower, upper, |x| *x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_endpoints_and_spacing() {
        let grid = MzGrid::for_parent(100.0, EFFICIENCY_GRID_STEP).unwrap();
        assert_eq!(grid.len(), 15_001);
        assert_eq!(grid.values()[0], 0.0);
        assert_eq!(grid.values()[1], 0.01);
        assert_eq!(grid.values()[12_345], 123.45);
        assert_eq!(*grid.values().last().unwrap(), 150.0);
        assert!(grid.values().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_spacing_is_fixed_when_quotient_is_inexact() {
        // 4.02 + 50 is just under 54.02 in floating point
        let grid = MzGrid::for_parent(4.02, EFFICIENCY_GRID_STEP).unwrap();
        assert_eq!(grid.len(), 5_403);
        assert_eq!(*grid.values().last().unwrap(), 54.02);
        assert!(
            grid.values()
                .windows(2)
                .all(|w| (w[1] - w[0] - 0.01).abs() < 1e-9)
        );

        for parent in [4.27, 4.52, 203.07, 1234.56] {
            let grid = MzGrid::for_parent(parent, EFFICIENCY_GRID_STEP).unwrap();
            let irregular = grid
                .values()
                .windows(2)
                .filter(|w| (w[1] - w[0] - 0.01).abs() > 1e-9)
                .count();
            assert_eq!(irregular, 0, "parent {}", parent);
        }
    }

    #[test]
    fn test_oversized_grid_is_error() {
        assert!(matches!(
            MzGrid::for_parent(1e17, EFFICIENCY_GRID_STEP),
            Err(PhotofragError::InvalidGrid { .. })
        ));
    }

    #[test]
    fn test_raw_export_grid() {
        let grid = MzGrid::for_parent(203.0, RAW_EXPORT_GRID_STEP).unwrap();
        assert_eq!(grid.len(), 12_651);
        assert_eq!(grid.values()[1], 0.02);
        assert_eq!(*grid.values().last().unwrap(), 253.0);
    }

    #[test]
    fn test_grid_is_deterministic() {
        let a = MzGrid::for_parent(203.0, 0.01).unwrap();
        let b = MzGrid::for_parent(203.0, 0.01).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_grids() {
        assert!(MzGrid::try_new(0.0, 10.0, 0.0).is_err());
        assert!(MzGrid::try_new(0.0, 10.0, -1.0).is_err());
        assert!(MzGrid::try_new(0.0, 10.0, f64::NAN).is_err());
        assert!(MzGrid::try_new(10.0, 0.0, 0.01).is_err());
    }

    #[test]
    fn test_window_range() {
        let grid = MzGrid::try_new(0.0, 10.0, 0.01).unwrap();
        let window = MassWindow::try_new(1.001, 1.999).unwrap();
        let range = grid.window_range(&window);
        assert_eq!(grid.values()[range.start], 1.0);
        assert_eq!(grid.values()[range.end - 1], 2.0);

        let outside = MassWindow::try_new(20.0, 30.0).unwrap();
        assert!(grid.window_range(&outside).is_empty());
    }
}
