pub mod csv_output;
pub mod file_listing;
pub mod power_table;
pub mod spectrum_source;

pub use csv_output::{
    RAW_DATA_FILE_STEM,
    RESULT_FILE_STEM,
    unique_output_path,
    write_raw_spectra,
    write_result_table,
};
pub use file_listing::{
    DEFAULT_SCAN_EXTENSION,
    list_scan_files,
};
pub use power_table::read_power_table;
pub use spectrum_source::{
    InMemorySource,
    MzmlSource,
    SpectrumIter,
    SpectrumSource,
};
