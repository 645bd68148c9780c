use crate::errors::{
    PhotofragError,
    Result,
};
use crate::grid::{
    MzGrid,
    RAW_EXPORT_GRID_STEP,
};
use crate::interpolation::interpolate_onto_grid;
use crate::io::SpectrumSource;
use crate::models::{
    MassWindow,
    RawSpectraTable,
};
use crate::progress::ProgressReporter;
use crate::utils::file_label;
use crate::wavelength::{
    parse_wavelength,
    parse_wavelength_label,
};
use std::path::{
    Path,
    PathBuf,
};
use std::time::Instant;
use tracing::{
    instrument,
    warn,
};

/// Point-wise mean of all the scans of a file, on `grid`.
pub fn average_spectrum<S: SpectrumSource + ?Sized>(
    source: &S,
    file: &Path,
    grid: &MzGrid,
) -> Result<Vec<f64>> {
    let mut sum = vec![0.0; grid.len()];
    let mut num_scans = 0usize;
    for (scan_idx, spectrum) in source.spectra(file)?.enumerate() {
        let intensities = interpolate_onto_grid(&spectrum?, grid)
            .map_err(|e| e.append_to_context(&format!(" in scan {}", scan_idx + 1)))?;
        sum.iter_mut()
            .zip(intensities.iter())
            .for_each(|(acc, x)| *acc += x);
        num_scans += 1;
    }

    if num_scans == 0 {
        return Err(PhotofragError::NoScansFound {
            context: String::new(),
        });
    }
    let n = num_scans as f64;
    sum.iter_mut().for_each(|x| *x /= n);
    Ok(sum)
}

/// Builds the scan averaged spectrum of every file on the coarse
/// ([`RAW_EXPORT_GRID_STEP`]) grid, one column per wavelength label.
///
/// Columns follow the file order. Two files with the same wavelength label
/// share a column, the later one wins.
#[instrument(skip_all, fields(num_files = files.len()))]
pub fn export_raw_spectra<S: SpectrumSource, R: ProgressReporter>(
    source: &S,
    files: &[PathBuf],
    parent_window: &MassWindow,
    reporter: &R,
) -> Result<RawSpectraTable> {
    let start = Instant::now();
    reporter.batch_started(files.len());

    let out = export_inner(source, files, parent_window, reporter);
    match &out {
        Ok(table) => reporter.batch_finished(table.columns.len(), start.elapsed()),
        Err(e) => reporter.failed(e),
    }
    out
}

fn export_inner<S: SpectrumSource, R: ProgressReporter>(
    source: &S,
    files: &[PathBuf],
    parent_window: &MassWindow,
    reporter: &R,
) -> Result<RawSpectraTable> {
    let grid = MzGrid::for_parent(parent_window.parent_mz(), RAW_EXPORT_GRID_STEP)?;
    let mut columns: Vec<(String, Vec<f64>)> = Vec::with_capacity(files.len());

    for (index, file) in files.iter().enumerate() {
        let file_start = Instant::now();
        reporter.file_started(index, file);

        let name = file_label(file);
        let label = parse_wavelength_label(&name)?.to_string();
        let wavelength = parse_wavelength(&name)?;
        let averaged = average_spectrum(source, file, &grid)
            .map_err(|e| e.append_to_context(&format!(" in {}", name)))?;

        match columns.iter_mut().find(|(l, _)| *l == label) {
            Some((_, values)) => {
                warn!(
                    "Wavelength label {} appears more than once, keeping the data from {}",
                    label, name
                );
                *values = averaged;
            }
            None => columns.push((label, averaged)),
        }
        reporter.file_finished(index, file, wavelength, file_start.elapsed());
    }

    Ok(RawSpectraTable {
        mz: grid.values().to_vec(),
        columns,
    })
}
