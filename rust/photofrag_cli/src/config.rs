use photofrag::io::DEFAULT_SCAN_EXTENSION;
use photofrag::models::parse_window_list;
use photofrag::{
    BatchConfig,
    MassWindow,
};
use serde::{
    Deserialize,
    Serialize,
};
use std::path::{
    Path,
    PathBuf,
};
use std::str::FromStr;

use crate::cli::ComputeArgs;
use crate::error::CliError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub input: InputConfig,
    pub analysis: BatchConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_extension() -> String {
    DEFAULT_SCAN_EXTENSION.to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct InputConfig {
    pub scan_directory: PathBuf,
    #[serde(default = "default_extension")]
    pub extension: String,
    #[serde(default)]
    pub power_table: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct OutputConfig {
    /// Defaults to the parent of the scan directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub export_raw: bool,
}

impl Config {
    pub fn from_path(path: &Path) -> Result<Self, CliError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    /// Loads the config file (if any) and applies the command line
    /// overrides on top.
    pub fn with_cli_args(args: &ComputeArgs) -> Result<Self, CliError> {
        let parent = args
            .parent
            .as_deref()
            .map(MassWindow::from_str)
            .transpose()?;
        let fragments = args
            .fragments
            .as_deref()
            .map(parse_window_list)
            .transpose()?;

        let mut config = match &args.config {
            Some(path) => Self::from_path(path)?,
            None => {
                let missing = |what: &str, flag: &str| {
                    CliError::Config(format!(
                        "No {} provided, please provide one in either the config file or with the {} flag",
                        what, flag
                    ))
                };
                Self {
                    input: InputConfig {
                        scan_directory: args
                            .scan_dir
                            .clone()
                            .ok_or_else(|| missing("scan directory", "--scan-dir"))?,
                        extension: default_extension(),
                        power_table: None,
                    },
                    analysis: BatchConfig::new(
                        parent.ok_or_else(|| missing("parent window", "--parent"))?,
                        fragments
                            .clone()
                            .ok_or_else(|| missing("fragment windows", "--fragments"))?,
                    ),
                    output: OutputConfig::default(),
                }
            }
        };

        if let Some(scan_dir) = &args.scan_dir {
            config.input.scan_directory = scan_dir.clone();
        }
        if let Some(extension) = &args.extension {
            config.input.extension = extension.clone();
        }
        if let Some(power_table) = &args.power_table {
            config.input.power_table = Some(power_table.clone());
        }
        if let Some(parent) = parent {
            config.analysis.parent_window = parent;
        }
        if let Some(fragments) = fragments {
            config.analysis.fragment_windows = fragments;
        }
        if let Some(lookup) = args.power_lookup {
            config.analysis.power_lookup = lookup.into();
        }
        if args.parallel {
            config.analysis.parallel = true;
        }
        if let Some(output_dir) = &args.output_dir {
            config.output.directory = Some(output_dir.clone());
        }
        if args.export_raw {
            config.output.export_raw = true;
        }

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), CliError> {
        if self.analysis.fragment_windows.is_empty() {
            return Err(CliError::Config(
                "At least one fragment window is needed".to_string(),
            ));
        }
        Ok(())
    }

    /// Directory for the efficiency table.
    pub fn result_directory(&self) -> PathBuf {
        match &self.output.directory {
            Some(dir) => dir.clone(),
            None => self
                .input
                .scan_directory
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }
}
