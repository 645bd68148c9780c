use crate::errors::{
    PhotofragError,
    Result,
};

/// Mean and population standard deviation of the per-scan areas of one
/// mass window within one file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationResult {
    pub mean: f64,
    pub std_dev: f64,
}

/// A photofragmentation efficiency and its propagated uncertainty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Efficiency {
    pub value: f64,
    pub std_dev: f64,
}

/// Results for a single scan file, ie. a single laser wavelength.
#[derive(Debug, Clone, PartialEq)]
pub struct WavelengthRecord {
    pub wavelength: f64,
    pub total: Efficiency,
    pub channels: Vec<Efficiency>,
}

impl WavelengthRecord {
    /// Flattens the record in output column order:
    /// wavelength, total, total stdev, then value/stdev per channel.
    pub fn to_row(&self) -> Vec<f64> {
        let mut row = Vec::with_capacity(3 + 2 * self.channels.len());
        row.push(self.wavelength);
        row.push(self.total.value);
        row.push(self.total.std_dev);
        for channel in self.channels.iter() {
            row.push(channel.value);
            row.push(channel.std_dev);
        }
        row
    }
}

/// Per-wavelength efficiencies for a whole batch, in file processing order.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultTable {
    channel_labels: Vec<String>,
    records: Vec<WavelengthRecord>,
}

impl ResultTable {
    pub fn new(channel_labels: Vec<String>) -> Self {
        Self {
            channel_labels,
            records: Vec::new(),
        }
    }

    pub fn push(&mut self, record: WavelengthRecord) -> Result<()> {
        if record.channels.len() != self.channel_labels.len() {
            return Err(PhotofragError::ChannelCountMismatch {
                expected: self.channel_labels.len(),
                found: record.channels.len(),
            });
        }
        self.records.push(record);
        Ok(())
    }

    pub fn column_names(&self) -> Vec<String> {
        let mut names = vec![
            "Wavelength".to_string(),
            "Total PE".to_string(),
            "Total PE stdev".to_string(),
        ];
        for label in self.channel_labels.iter() {
            names.push(format!("PE mz {}", label));
            names.push(format!("PE mz {} stdev", label));
        }
        names
    }

    pub fn channel_labels(&self) -> &[String] {
        &self.channel_labels
    }

    pub fn records(&self) -> &[WavelengthRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Scan-averaged spectra on a shared grid, one column per file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSpectraTable {
    pub mz: Vec<f64>,
    /// `(wavelength label, averaged intensities)`, aligned with `mz`.
    pub columns: Vec<(String, Vec<f64>)>,
}
