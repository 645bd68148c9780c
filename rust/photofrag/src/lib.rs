#![doc = include_str!("../README.md")]

// Re-export main structures
pub use crate::batch::{
    BatchConfig,
    BatchProcessor,
    integrate_file,
};
pub use crate::efficiency::{
    EfficiencyInputs,
    EfficiencyModel,
};
pub use crate::grid::MzGrid;
pub use crate::models::{
    Efficiency,
    IntegrationResult,
    LaserPowerEntry,
    MassWindow,
    PowerLookup,
    PowerTable,
    RawSpectraTable,
    ResultTable,
    Spectrum,
    WavelengthRecord,
};
pub use crate::raw_export::export_raw_spectra;

// Re-export traits
pub use crate::io::SpectrumSource;
pub use crate::progress::ProgressReporter;

// Declare modules
pub mod aggregation;
pub mod batch;
pub mod efficiency;
pub mod errors;
pub mod grid;
pub mod integration;
pub mod interpolation;
pub mod io;
pub mod models;
pub mod progress;
pub mod raw_export;
pub mod utils;
pub mod wavelength;

// Re-export errors
pub use crate::errors::{
    PhotofragError,
    Result,
};
