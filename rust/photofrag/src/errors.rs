use std::path::PathBuf;
use thiserror::Error;

use crate::models::MassWindow;

/// Every failure a batch run can hit.
///
/// All of these are terminal for the batch: there is no per-file
/// skip-and-continue. Variants that can happen deep inside the numeric
/// pipeline carry a free-form `context` that the callers extend (with
/// [`PhotofragError::append_to_context`]) as the error bubbles up, so the
/// final message names the file, scan and window that failed.
#[derive(Error, Debug)]
pub enum PhotofragError {
    #[error(
        "m/z and intensity arrays have different lengths ({mz_len} vs {intensity_len}){context}"
    )]
    ArrayLengthMismatch {
        mz_len: usize,
        intensity_len: usize,
        context: String,
    },

    #[error("Interpolation error: {reason}{context}")]
    InterpolationError { reason: String, context: String },

    #[error("Integration error for window {window}: {reason}{context}")]
    IntegrationError {
        window: MassWindow,
        reason: String,
        context: String,
    },

    #[error("No scans found{context}")]
    NoScansFound { context: String },

    #[error(
        "Could not extract the wavelength from '{name}', the file name must contain 'Laser' followed by digits"
    )]
    WavelengthParseError { name: String },

    #[error(
        "Division by zero at wavelength {wavelength}nm: power = {power}, parent area = {parent_area}, fragment area = {fragment_area}{context}"
    )]
    DivisionByZero {
        wavelength: f64,
        power: f64,
        parent_area: f64,
        fragment_area: f64,
        context: String,
    },

    #[error(
        "The number of scan files ({files}) does not match the number of rows in the laser power table ({rows})"
    )]
    RowCountMismatch { files: usize, rows: usize },

    #[error("No laser power entry found for wavelength {wavelength}nm")]
    PowerEntryNotFound { wavelength: f64 },

    #[error("Record has {found} fragment channels, expected {expected}")]
    ChannelCountMismatch { expected: usize, found: usize },

    #[error("No files with extension '{extension}' found in {}", directory.display())]
    NoInputFiles {
        directory: PathBuf,
        extension: String,
    },

    #[error("Invalid grid: {reason}")]
    InvalidGrid { reason: String },

    #[error("Invalid mass window '{input}': {reason}")]
    InvalidWindow { input: String, reason: String },

    #[error("Error reading spectra from {}: {reason}", path.display())]
    SpectrumRead { path: PathBuf, reason: String },

    #[error("Laser power table {} line {line}: {reason}", path.display())]
    PowerTableFormat {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("I/O error{}: {source}", path.as_ref().map(|p| format!(" at {}", p.display())).unwrap_or_default())]
    Io {
        source: std::io::Error,
        path: Option<PathBuf>,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, PhotofragError>;

impl PhotofragError {
    pub fn interpolation(reason: impl Into<String>) -> Self {
        Self::InterpolationError {
            reason: reason.into(),
            context: String::new(),
        }
    }

    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: Some(path.into()),
        }
    }

    /// Adds a location hint (eg. " in scan 3 of foo.mzML") to the variants
    /// that carry context. Other variants are returned untouched.
    pub fn append_to_context(mut self, extra: &str) -> Self {
        match &mut self {
            PhotofragError::ArrayLengthMismatch { context, .. }
            | PhotofragError::InterpolationError { context, .. }
            | PhotofragError::IntegrationError { context, .. }
            | PhotofragError::NoScansFound { context }
            | PhotofragError::DivisionByZero { context, .. } => {
                context.push_str(extra);
            }
            _ => {}
        }
        self
    }
}

impl From<std::io::Error> for PhotofragError {
    fn from(source: std::io::Error) -> Self {
        Self::Io { source, path: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_is_appended_in_order() {
        let err = PhotofragError::interpolation("non-finite m/z")
            .append_to_context(" in scan 2")
            .append_to_context(" of Laser400.mzML");
        assert_eq!(
            err.to_string(),
            "Interpolation error: non-finite m/z in scan 2 of Laser400.mzML"
        );
    }

    #[test]
    fn test_context_ignored_for_contextless_variants() {
        let err = PhotofragError::RowCountMismatch { files: 2, rows: 1 }.append_to_context(" x");
        assert!(matches!(
            err,
            PhotofragError::RowCountMismatch { files: 2, rows: 1 }
        ));
    }
}
