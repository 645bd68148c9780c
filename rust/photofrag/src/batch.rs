use crate::aggregation::ScanAggregator;
use crate::efficiency::{
    EfficiencyInputs,
    EfficiencyModel,
    combine_fragment_channels,
};
use crate::errors::{
    PhotofragError,
    Result,
};
use crate::grid::{
    EFFICIENCY_GRID_STEP,
    MzGrid,
};
use crate::integration::{
    integrate_window,
    window_overlaps_grid,
};
use crate::interpolation::interpolate_onto_grid;
use crate::io::SpectrumSource;
use crate::models::{
    IntegrationResult,
    MassWindow,
    PowerLookup,
    PowerTable,
    ResultTable,
    WavelengthRecord,
};
use crate::progress::ProgressReporter;
use crate::utils::file_label;
use crate::wavelength::parse_wavelength;
use rayon::prelude::*;
use serde::{
    Deserialize,
    Serialize,
};
use std::path::{
    Path,
    PathBuf,
};
use std::time::Instant;
use tracing::{
    debug,
    instrument,
    warn,
};

fn default_grid_step() -> f64 {
    EFFICIENCY_GRID_STEP
}

/// What to integrate and how to turn it into efficiencies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub parent_window: MassWindow,
    pub fragment_windows: Vec<MassWindow>,
    #[serde(default = "default_grid_step")]
    pub grid_step: f64,
    #[serde(default)]
    pub power_lookup: PowerLookup,
    /// Process files in parallel. The output order does not change.
    #[serde(default)]
    pub parallel: bool,
}

impl BatchConfig {
    pub fn new(parent_window: MassWindow, fragment_windows: Vec<MassWindow>) -> Self {
        Self {
            parent_window,
            fragment_windows,
            grid_step: EFFICIENCY_GRID_STEP,
            power_lookup: PowerLookup::default(),
            parallel: false,
        }
    }

    /// Parent window first, then the fragment windows in order.
    pub fn all_windows(&self) -> Vec<MassWindow> {
        let mut windows = Vec::with_capacity(1 + self.fragment_windows.len());
        windows.push(self.parent_window);
        windows.extend(self.fragment_windows.iter().copied());
        windows
    }

    pub fn channel_labels(&self) -> Vec<String> {
        self.fragment_windows
            .iter()
            .map(|w| w.channel_label())
            .collect()
    }
}

/// Integrates every window over every scan of one file.
///
/// Each scan is interpolated once and then integrated over all the windows,
/// the per-scan areas are reduced to mean/std per window at the end.
/// Results come back in the same order as `windows`.
pub fn integrate_file<S: SpectrumSource + ?Sized>(
    source: &S,
    file: &Path,
    grid: &MzGrid,
    windows: &[MassWindow],
) -> Result<Vec<IntegrationResult>> {
    let mut aggregator = ScanAggregator::new(windows.len());
    let mut scan_areas = vec![0.0; windows.len()];

    for (scan_idx, spectrum) in source.spectra(file)?.enumerate() {
        let in_scan = || format!(" in scan {}", scan_idx + 1);
        let spectrum = spectrum?;
        let intensities =
            interpolate_onto_grid(&spectrum, grid).map_err(|e| e.append_to_context(&in_scan()))?;
        for (area, window) in scan_areas.iter_mut().zip(windows.iter()) {
            *area = integrate_window(grid, &intensities, window)
                .map_err(|e| e.append_to_context(&in_scan()))?;
        }
        aggregator.add_scan(&scan_areas);
    }

    debug!(
        "Integrated {} windows over {} scans of {}",
        windows.len(),
        aggregator.num_scans(),
        file.display()
    );
    aggregator.finish()
}

/// Turns a batch of scan files (one per laser wavelength) into a
/// [`ResultTable`].
pub struct BatchProcessor<'a, S: SpectrumSource, R: ProgressReporter> {
    source: &'a S,
    config: &'a BatchConfig,
    reporter: &'a R,
    grid: MzGrid,
}

impl<'a, S: SpectrumSource, R: ProgressReporter> BatchProcessor<'a, S, R> {
    pub fn new(source: &'a S, config: &'a BatchConfig, reporter: &'a R) -> Result<Self> {
        let grid = MzGrid::for_parent(config.parent_window.parent_mz(), config.grid_step)?;
        for window in config.all_windows() {
            if !window_overlaps_grid(&grid, &window) {
                warn!(
                    "Window {} does not overlap the m/z grid [{}, {}], its area will always be 0",
                    window,
                    grid.values().first().copied().unwrap_or_default(),
                    grid.values().last().copied().unwrap_or_default(),
                );
            }
        }
        Ok(Self {
            source,
            config,
            reporter,
            grid,
        })
    }

    pub fn grid(&self) -> &MzGrid {
        &self.grid
    }

    /// Processes all files, in the given order.
    ///
    /// With a power table the efficiencies are normalized to laser power,
    /// and the table needs exactly one row per file. The first failure
    /// aborts the whole batch.
    #[instrument(skip_all, fields(num_files = files.len()))]
    pub fn run(&self, files: &[PathBuf], power_table: Option<&PowerTable>) -> Result<ResultTable> {
        let start = Instant::now();
        self.reporter.batch_started(files.len());

        let out = self.run_inner(files, power_table);
        match &out {
            Ok(table) => self.reporter.batch_finished(table.len(), start.elapsed()),
            Err(e) => self.reporter.failed(e),
        }
        out
    }

    fn run_inner(&self, files: &[PathBuf], power_table: Option<&PowerTable>) -> Result<ResultTable> {
        if let Some(table) = power_table {
            if table.len() != files.len() {
                return Err(PhotofragError::RowCountMismatch {
                    files: files.len(),
                    rows: table.len(),
                });
            }
        }

        let records: Vec<WavelengthRecord> = if self.config.parallel {
            files
                .par_iter()
                .enumerate()
                .map(|(i, file)| self.process_file(i, file, power_table))
                .collect::<Result<_>>()?
        } else {
            files
                .iter()
                .enumerate()
                .map(|(i, file)| self.process_file(i, file, power_table))
                .collect::<Result<_>>()?
        };

        let mut table = ResultTable::new(self.config.channel_labels());
        for record in records {
            table.push(record)?;
        }
        Ok(table)
    }

    #[instrument(skip(self, file, power_table), fields(file = %file.display()))]
    fn process_file(
        &self,
        index: usize,
        file: &Path,
        power_table: Option<&PowerTable>,
    ) -> Result<WavelengthRecord> {
        let start = Instant::now();
        self.reporter.file_started(index, file);

        let name = file_label(file);
        let wavelength = parse_wavelength(&name)?;
        let in_file = format!(" in {}", name);

        // Parent first, then one entry per fragment window.
        let mut areas = integrate_file(self.source, file, &self.grid, &self.config.all_windows())
            .map_err(|e| e.append_to_context(&in_file))?;
        let fragments = areas.split_off(1);
        let parent = areas[0];

        let (model, power, power_std) = match power_table {
            Some(table) => {
                let entry = table.lookup(self.config.power_lookup, index, wavelength)?;
                (EfficiencyModel::PowerNormalized, entry.power, entry.power_std)
            }
            None => (EfficiencyModel::Unnormalized, 0.0, 0.0),
        };
        let inputs = |fragment: IntegrationResult| EfficiencyInputs {
            wavelength,
            power,
            power_std,
            parent,
            fragment,
        };

        let channels = fragments
            .iter()
            .zip(self.config.fragment_windows.iter())
            .map(|(fragment, window)| {
                model.compute(&inputs(*fragment)).map_err(|e| {
                    e.append_to_context(&format!(" for fragment window {}{}", window, in_file))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let total_fragment = combine_fragment_channels(&fragments);
        let total = model
            .compute(&inputs(total_fragment))
            .map_err(|e| e.append_to_context(&format!(" for the total fragment signal{}", in_file)))?;

        self.reporter
            .file_finished(index, file, wavelength, start.elapsed());
        Ok(WavelengthRecord {
            wavelength,
            total,
            channels,
        })
    }
}
