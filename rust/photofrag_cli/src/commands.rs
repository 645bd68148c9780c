use photofrag::io::{
    MzmlSource,
    RAW_DATA_FILE_STEM,
    RESULT_FILE_STEM,
    list_scan_files,
    read_power_table,
    unique_output_path,
    write_raw_spectra,
    write_result_table,
};
use photofrag::progress::ProgressReporter;
use photofrag::{
    BatchProcessor,
    MassWindow,
    export_raw_spectra,
};
use std::path::{
    Path,
    PathBuf,
};
use std::str::FromStr;
use tracing::{
    info,
    instrument,
};

use crate::cli::{
    ComputeArgs,
    ExportRawArgs,
    WriteTemplateArgs,
};
use crate::config::Config;
use crate::error::CliError;
use crate::progress::IndicatifReporter;

/// Main function for the 'compute' subcommand.
#[instrument(skip_all)]
pub fn main_compute(args: ComputeArgs) -> Result<(), CliError> {
    let config = Config::with_cli_args(&args)?;
    info!("Parsed configuration: {:#?}", config);

    let files = list_scan_files(&config.input.scan_directory, &config.input.extension)?;
    let power_table = config
        .input
        .power_table
        .as_deref()
        .map(read_power_table)
        .transpose()?;
    if power_table.is_none() {
        info!("No laser power table given, efficiencies will not be power normalized");
    }

    let reporter = IndicatifReporter::new();
    let table = BatchProcessor::new(&MzmlSource, &config.analysis, &reporter)?
        .run(&files, power_table.as_ref())?;

    let out_dir = config.result_directory();
    std::fs::create_dir_all(&out_dir)?;
    let out_path = unique_output_path(&out_dir, RESULT_FILE_STEM, "csv");
    write_result_table(&table, &out_path)?;

    if config.output.export_raw {
        export_raw(
            &files,
            &config.analysis.parent_window,
            &config.input.scan_directory,
            &IndicatifReporter::new(),
        )?;
    }
    Ok(())
}

/// Main function for the 'export-raw' subcommand.
#[instrument(skip_all)]
pub fn main_export_raw(args: ExportRawArgs) -> Result<(), CliError> {
    let parent_window = MassWindow::from_str(&args.parent)?;
    let files = list_scan_files(&args.scan_dir, &args.extension)?;
    export_raw(
        &files,
        &parent_window,
        &args.scan_dir,
        &IndicatifReporter::new(),
    )?;
    Ok(())
}

fn export_raw<R: ProgressReporter>(
    files: &[PathBuf],
    parent_window: &MassWindow,
    scan_dir: &Path,
    reporter: &R,
) -> Result<PathBuf, CliError> {
    info!("Exporting scan averaged spectra");
    let table = export_raw_spectra(&MzmlSource, files, parent_window, reporter)?;
    let out_path = unique_output_path(scan_dir, RAW_DATA_FILE_STEM, "csv");
    write_raw_spectra(&table, &out_path)?;
    Ok(out_path)
}

pub(crate) const CONFIG_TEMPLATE: &str = r#"{
  "input": {
    "scan_directory": "path/to/scans",
    "extension": ".mzML",
    "power_table": null
  },
  "analysis": {
    "parent_window": [202.5, 203.5],
    "fragment_windows": [[50.5, 51.5], [102.5, 103.5]],
    "grid_step": 0.01,
    "power_lookup": "positional",
    "parallel": false
  },
  "output": {
    "directory": null,
    "export_raw": false
  }
}"#;

/// Main function for the 'write-template' subcommand.
pub fn main_write_template(args: WriteTemplateArgs) -> Result<(), CliError> {
    let output_path = args.output_path;
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&output_path, CONFIG_TEMPLATE)?;
    info!("Template configuration written to {}", output_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use photofrag::PowerLookup;

    #[test]
    fn test_template_is_valid_config() {
        let config: Config = serde_json::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.analysis.fragment_windows.len(), 2);
        assert_eq!(config.analysis.power_lookup, PowerLookup::Positional);
        assert_eq!(config.input.power_table, None);
        assert_eq!(config.analysis.parent_window.parent_mz(), 203.0);
    }

    #[test]
    fn test_write_template() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        main_write_template(WriteTemplateArgs {
            output_path: path.clone(),
        })
        .unwrap();
        let written = Config::from_path(&path).unwrap();
        let expected: Config = serde_json::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(written, expected);
    }
}
