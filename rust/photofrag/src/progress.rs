use crate::errors::PhotofragError;
use std::path::Path;
use std::time::Duration;
use tracing::{
    error,
    info,
};

/// Hooks called by the batch workflows at well defined checkpoints.
///
/// All methods default to doing nothing. Implementations have to be
/// `Sync`, files can be processed in parallel.
pub trait ProgressReporter: Sync {
    fn batch_started(&self, _num_files: usize) {}
    fn file_started(&self, _index: usize, _file: &Path) {}
    fn file_finished(&self, _index: usize, _file: &Path, _wavelength: f64, _elapsed: Duration) {}
    fn batch_finished(&self, _num_records: usize, _elapsed: Duration) {}
    fn failed(&self, _error: &PhotofragError) {}
}

/// Ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {}

/// Reports through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn batch_started(&self, num_files: usize) {
        info!("Starting interpolation and integration of {} scan files", num_files);
    }

    fn file_started(&self, index: usize, file: &Path) {
        info!("Processing file {}: {}", index + 1, file.display());
    }

    fn file_finished(&self, _index: usize, file: &Path, wavelength: f64, elapsed: Duration) {
        info!(
            "Integration for {}nm ({}) has completed in {:.2?}",
            wavelength.round(),
            file.display(),
            elapsed
        );
    }

    fn batch_finished(&self, num_records: usize, elapsed: Duration) {
        info!("Processed {} wavelengths in {:.2?}", num_records, elapsed);
    }

    fn failed(&self, error: &PhotofragError) {
        error!("Batch aborted: {}", error);
    }
}
