use crate::errors::{
    PhotofragError,
    Result,
};
use crate::models::{
    RawSpectraTable,
    ResultTable,
};
use std::path::{
    Path,
    PathBuf,
};
use tracing::{
    debug,
    info,
};

pub const RESULT_FILE_STEM: &str = "photofragmentation_efficiency";
pub const RAW_DATA_FILE_STEM: &str = "Raw_data";

/// `directory/stem.extension`, or the first free
/// `directory/stem_N.extension` (N = 1, 2, ...) if that already exists.
pub fn unique_output_path(directory: &Path, stem: &str, extension: &str) -> PathBuf {
    let mut path = directory.join(format!("{}.{}", stem, extension));
    let mut index = 0;
    while path.exists() {
        debug!("{} already exists, trying the next suffix", path.display());
        index += 1;
        path = directory.join(format!("{}_{}.{}", stem, index, extension));
    }
    path
}

/// Writes the efficiencies, all values with 6 decimals.
pub fn write_result_table(table: &ResultTable, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(table.column_names())?;
    for record in table.records() {
        wtr.write_record(record.to_row().iter().map(|x| format!("{:.6}", x)))?;
    }
    wtr.flush().map_err(|e| PhotofragError::io(e, path))?;
    info!(
        "The photofragmentation efficiency data has been written to {}",
        path.display()
    );
    Ok(())
}

/// Writes the scan averaged spectra, `m/z` first and one column per file.
pub fn write_raw_spectra(table: &RawSpectraTable, path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    let mut header = vec!["m/z".to_string()];
    header.extend(table.columns.iter().map(|(label, _)| label.clone()));
    wtr.write_record(&header)?;

    for (i, mz) in table.mz.iter().enumerate() {
        let mut row = Vec::with_capacity(table.columns.len() + 1);
        row.push(mz.to_string());
        row.extend(table.columns.iter().map(|(_, values)| values[i].to_string()));
        wtr.write_record(&row)?;
    }
    wtr.flush().map_err(|e| PhotofragError::io(e, path))?;
    info!("Raw data has been written to {}", path.display());
    Ok(())
}
