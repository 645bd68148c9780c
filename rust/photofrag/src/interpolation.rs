use crate::errors::{
    PhotofragError,
    Result,
};
use crate::grid::MzGrid;
use crate::models::Spectrum;

/// Interpolates one scan onto the grid.
///
/// Grid points outside the observed m/z range of the scan are added to it
/// as explicit zero-intensity points before interpolating. So the signal
/// ramps down to zero right after the last observed peak instead of being
/// held at the edge value over the rest of the grid.
///
/// Points are then sorted by m/z (stable sort; when two points share an
/// m/z the one that comes later wins) and linearly interpolated at every
/// grid value. Grid values beyond the extremes take the boundary value.
///
/// Returns one intensity per grid point.
pub fn interpolate_onto_grid(spectrum: &Spectrum, grid: &MzGrid) -> Result<Vec<f64>> {
    if spectrum.mz.len() != spectrum.intensity.len() {
        return Err(PhotofragError::ArrayLengthMismatch {
            mz_len: spectrum.mz.len(),
            intensity_len: spectrum.intensity.len(),
            context: String::new(),
        });
    }
    if let Some(bad) = spectrum
        .mz
        .iter()
        .chain(spectrum.intensity.iter())
        .find(|x| !x.is_finite())
    {
        return Err(PhotofragError::interpolation(format!(
            "scan contains a non-finite value ({})",
            bad
        )));
    }
    let (min_mz, max_mz) = spectrum
        .mz_range()
        .ok_or_else(|| PhotofragError::interpolation("scan contains no data points"))?;

    let mut points: Vec<(f64, f64)> = spectrum
        .mz
        .iter()
        .copied()
        .zip(spectrum.intensity.iter().copied())
        .collect();
    points.extend(
        grid.values()
            .iter()
            .filter(|&&x| x < min_mz || x > max_mz)
            .map(|&x| (x, 0.0)),
    );
    points.sort_by(|a, b| a.0.total_cmp(&b.0));
    let points = dedup_keep_last(points);

    Ok(linear_interpolate(&points, grid.values()))
}

fn dedup_keep_last(points: Vec<(f64, f64)>) -> Vec<(f64, f64)> {
    let mut out: Vec<(f64, f64)> = Vec::with_capacity(points.len());
    for point in points {
        match out.last_mut() {
            Some(last) if last.0 == point.0 => *last = point,
            _ => out.push(point),
        }
    }
    out
}

/// Piecewise linear interpolation of `points` (sorted, unique x, non-empty)
/// at every `query` value (sorted ascending).
fn linear_interpolate(points: &[(f64, f64)], query: &[f64]) -> Vec<f64> {
    let (first_x, first_y) = points[0];
    let (last_x, last_y) = points[points.len() - 1];

    let mut out = Vec::with_capacity(query.len());
    // Both sequences are sorted, so the bracketing segment only moves forward.
    let mut j = 0;
    for &x in query {
        if x <= first_x {
            out.push(first_y);
            continue;
        }
        if x >= last_x {
            out.push(last_y);
            continue;
        }
        while points[j + 1].0 < x {
            j += 1;
        }
        let (x0, y0) = points[j];
        let (x1, y1) = points[j + 1];
        if x1 == x {
            out.push(y1);
        } else {
            out.push(y0 + (y1 - y0) * (x - x0) / (x1 - x0));
        }
    }
    out
}
