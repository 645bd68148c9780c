use crate::errors::{
    PhotofragError,
    Result,
};
use crate::models::{
    LaserPowerEntry,
    PowerTable,
};
use std::path::Path;
use tracing::info;

/// Reads a laser power table.
///
/// The file must be a `.csv` with no header and exactly three numeric
/// columns per row: wavelength (nm), laser power and the standard
/// deviation of the laser power. Rows stay in file order.
pub fn read_power_table(path: &Path) -> Result<PowerTable> {
    let format_err = |line: usize, reason: String| PhotofragError::PowerTableFormat {
        path: path.to_path_buf(),
        line,
        reason,
    };

    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        return Err(format_err(
            0,
            "the laser power table has to be a comma separated (.csv) file".to_string(),
        ));
    }

    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut entries = Vec::new();
    for (i, record) in rdr.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(i + 1);

        if record.len() != 3 {
            return Err(format_err(
                line,
                format!(
                    "expected 3 columns (wavelength, power, power stdev), found {}",
                    record.len()
                ),
            ));
        }
        let values = record
            .iter()
            .map(|field| field.parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| format_err(line, format!("non-numeric entry in {:?}", record)))?;
        if values.iter().any(|v| !v.is_finite()) {
            return Err(format_err(
                line,
                format!("non-finite entry in {:?}", record),
            ));
        }

        entries.push(LaserPowerEntry {
            wavelength: values[0],
            power: values[1],
            power_std: values[2],
        });
    }

    info!(
        "Loaded {} laser power rows from {}",
        entries.len(),
        path.display()
    );
    Ok(PowerTable::new(entries))
}
