use crate::errors::{
    PhotofragError,
    Result,
};
use crate::grid::MzGrid;
use crate::models::MassWindow;

/// Trapezoidal integral of `y` over `x`.
///
/// Fewer than two points integrate to 0.
pub fn trapezoidal_integration(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 1..x.len() {
        let delta_x = x[i] - x[i - 1];
        let sum_y = y[i] + y[i - 1];
        area += delta_x * sum_y / 2.0;
    }
    area
}

/// Area under a grid-aligned intensity trace within `window`.
///
/// No clamping is applied, negative intensities give negative areas.
/// A window that does not overlap the grid integrates to 0, use
/// [`window_overlaps_grid`] to tell that apart from a real zero.
pub fn integrate_window(grid: &MzGrid, intensities: &[f64], window: &MassWindow) -> Result<f64> {
    if intensities.len() != grid.len() {
        return Err(PhotofragError::IntegrationError {
            window: *window,
            reason: format!(
                "expected {} intensities (one per grid point), got {}",
                grid.len(),
                intensities.len()
            ),
            context: String::new(),
        });
    }

    let range = grid.window_range(window);
    Ok(trapezoidal_integration(
        &grid.values()[range.clone()],
        &intensities[range],
    ))
}

/// Whether at least two grid points fall inside the window, ie. whether
/// integrating over it can give anything other than 0.
pub fn window_overlaps_grid(grid: &MzGrid, window: &MassWindow) -> bool {
    grid.window_range(window).len() >= 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trapezoidal_integration_simple() {
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![10.0, 20.0, 5.0, 0.0];
        // (1*(10+20)/2) + (1*(20+5)/2) + (1*(5+0)/2) = 15 + 12.5 + 2.5 = 30.0
        assert_eq!(trapezoidal_integration(&x, &y), 30.0);
    }

    #[test]
    fn test_trapezoidal_integration_uneven_spacing() {
        let x = vec![1.0, 3.0, 4.0, 6.0];
        let y = vec![10.0, 20.0, 5.0, 0.0];
        assert_eq!(trapezoidal_integration(&x, &y), 47.5);
    }

    #[test]
    fn test_trapezoidal_integration_degenerate() {
        assert_eq!(trapezoidal_integration(&[1.0], &[10.0]), 0.0);
        assert_eq!(trapezoidal_integration(&[], &[]), 0.0);
    }

    #[test]
    fn test_rectangular_pulse() {
        let grid = MzGrid::for_parent(50.0, 0.01).unwrap();
        let height = 7.0;
        let (start, end) = (10.0, 12.0);
        let intensities: Vec<f64> = grid
            .values()
            .iter()
            .map(|&x| if (start..=end).contains(&x) { height } else { 0.0 })
            .collect();

        let window = MassWindow::try_new(9.0, 13.0).unwrap();
        let area = integrate_window(&grid, &intensities, &window).unwrap();
        let expected = height * (end - start);
        assert!(
            (area - expected).abs() <= height * grid.step() + 1e-9,
            "area {} expected {}",
            area,
            expected
        );
    }

    #[test]
    fn test_window_subrange_and_negative_signal() {
        let grid = MzGrid::try_new(0.0, 1.0, 0.01).unwrap();
        let intensities = vec![-2.0; grid.len()];
        let window = MassWindow::try_new(0.1, 0.3).unwrap();
        let area = integrate_window(&grid, &intensities, &window).unwrap();
        assert!((area + 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_window_outside_grid() {
        let grid = MzGrid::try_new(0.0, 1.0, 0.01).unwrap();
        let intensities = vec![1.0; grid.len()];
        let window = MassWindow::try_new(5.0, 6.0).unwrap();
        assert_eq!(integrate_window(&grid, &intensities, &window).unwrap(), 0.0);
        assert!(!window_overlaps_grid(&grid, &window));
        assert!(window_overlaps_grid(
            &grid,
            &MassWindow::try_new(0.5, 0.6).unwrap()
        ));
    }

    #[test]
    fn test_misaligned_intensities() {
        let grid = MzGrid::try_new(0.0, 1.0, 0.01).unwrap();
        let window = MassWindow::try_new(0.1, 0.3).unwrap();
        assert!(matches!(
            integrate_window(&grid, &[1.0, 2.0], &window),
            Err(PhotofragError::IntegrationError { .. })
        ));
    }
}
