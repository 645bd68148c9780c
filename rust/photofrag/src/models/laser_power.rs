use crate::errors::{
    PhotofragError,
    Result,
};
use serde::{
    Deserialize,
    Serialize,
};
use tracing::warn;

/// One row of the laser power table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserPowerEntry {
    pub wavelength: f64,
    pub power: f64,
    pub power_std: f64,
}

/// How a scan file is matched with its row in the power table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PowerLookup {
    /// The n-th file uses the n-th row, regardless of wavelengths.
    #[default]
    Positional,
    /// The row with the same wavelength as the file.
    Wavelength,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PowerTable {
    entries: Vec<LaserPowerEntry>,
}

impl PowerTable {
    pub fn new(entries: Vec<LaserPowerEntry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[LaserPowerEntry] {
        &self.entries
    }

    /// Row that applies to the file at `file_index` (in enumeration order)
    /// with the parsed `wavelength`.
    pub fn lookup(
        &self,
        mode: PowerLookup,
        file_index: usize,
        wavelength: f64,
    ) -> Result<&LaserPowerEntry> {
        match mode {
            PowerLookup::Positional => {
                let entry =
                    self.entries
                        .get(file_index)
                        .ok_or(PhotofragError::RowCountMismatch {
                            files: file_index + 1,
                            rows: self.entries.len(),
                        })?;
                if entry.wavelength != wavelength {
                    warn!(
                        "Power table row {} is for {}nm but the scan file is at {}nm",
                        file_index + 1,
                        entry.wavelength,
                        wavelength
                    );
                }
                Ok(entry)
            }
            PowerLookup::Wavelength => self
                .entries
                .iter()
                .find(|e| e.wavelength == wavelength)
                .ok_or(PhotofragError::PowerEntryNotFound { wavelength }),
        }
    }
}
