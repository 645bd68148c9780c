use clap::{
    Parser,
    Subcommand,
};
use photofrag::PowerLookup;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute photofragmentation efficiencies for a directory of scans.
    Compute(ComputeArgs),
    /// Export the scan averaged spectrum of every file in a directory.
    ExportRaw(ExportRawArgs),
    /// Write a template configuration file.
    WriteTemplate(WriteTemplateArgs),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, clap::ValueEnum)]
pub enum PowerLookupArg {
    /// The n-th row of the power table goes with the n-th scan file.
    #[default]
    Positional,
    /// Match power table rows by wavelength.
    Wavelength,
}

impl From<PowerLookupArg> for PowerLookup {
    fn from(value: PowerLookupArg) -> Self {
        match value {
            PowerLookupArg::Positional => PowerLookup::Positional,
            PowerLookupArg::Wavelength => PowerLookup::Wavelength,
        }
    }
}

#[derive(Parser, Debug, Clone, Default)]
pub struct ComputeArgs {
    /// Path to a JSON configuration file. Any other flag overrides it.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory with the scan files, one file per laser wavelength.
    #[arg(short, long)]
    pub scan_dir: Option<PathBuf>,

    /// Extension of the scan files (case sensitive).
    #[arg(long)]
    pub extension: Option<String>,

    /// Parent ion m/z window, eg. "202.5,203.5".
    #[arg(short, long)]
    pub parent: Option<String>,

    /// Fragment m/z windows, eg. "(50.5,51.5),(102.5,103.5)".
    #[arg(short, long)]
    pub fragments: Option<String>,

    /// Laser power table (.csv, no header): wavelength, power, power stdev.
    #[arg(long)]
    pub power_table: Option<PathBuf>,

    /// How power table rows are matched to scan files.
    #[arg(long, value_enum)]
    pub power_lookup: Option<PowerLookupArg>,

    /// Where to write the results, defaults to the parent of the scan directory.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Process files in parallel.
    #[arg(long, default_value_t = false)]
    pub parallel: bool,

    /// Also write the scan averaged spectra to the scan directory.
    #[arg(long, default_value_t = false)]
    pub export_raw: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct ExportRawArgs {
    /// Directory with the scan files.
    #[arg(short, long)]
    pub scan_dir: PathBuf,

    /// Parent ion m/z window, eg. "202.5,203.5". Sets the extent of the m/z axis.
    #[arg(short, long)]
    pub parent: String,

    /// Extension of the scan files (case sensitive).
    #[arg(long, default_value = photofrag::io::DEFAULT_SCAN_EXTENSION)]
    pub extension: String,
}

#[derive(Parser, Debug)]
pub struct WriteTemplateArgs {
    /// The path to the output file.
    #[arg(short, long)]
    pub output_path: PathBuf,
}
