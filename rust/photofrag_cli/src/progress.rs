use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use photofrag::PhotofragError;
use photofrag::progress::{
    ProgressReporter,
    TracingReporter,
};
use std::path::Path;
use std::time::Duration;

const BAR_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} ({eta}) {msg}";

/// Progress bar over the scan files of a batch. Log lines are still
/// emitted through `tracing`, with the bar suspended while they print.
pub struct IndicatifReporter {
    bar: ProgressBar,
    log: TracingReporter,
}

impl IndicatifReporter {
    pub fn new() -> Self {
        let style =
            ProgressStyle::with_template(BAR_TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar = ProgressBar::new(0);
        bar.set_style(style);
        Self {
            bar,
            log: TracingReporter,
        }
    }
}

impl Default for IndicatifReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for IndicatifReporter {
    fn batch_started(&self, num_files: usize) {
        self.bar.set_length(num_files as u64);
        self.bar.suspend(|| self.log.batch_started(num_files));
    }

    fn file_started(&self, index: usize, file: &Path) {
        self.bar.suspend(|| self.log.file_started(index, file));
    }

    fn file_finished(&self, index: usize, file: &Path, wavelength: f64, elapsed: Duration) {
        self.bar
            .suspend(|| self.log.file_finished(index, file, wavelength, elapsed));
        self.bar.set_message(format!("{}nm", wavelength));
        self.bar.inc(1);
    }

    fn batch_finished(&self, num_records: usize, elapsed: Duration) {
        self.bar.finish_and_clear();
        self.log.batch_finished(num_records, elapsed);
    }

    fn failed(&self, error: &PhotofragError) {
        self.bar.abandon();
        self.log.failed(error);
    }
}
