use crate::errors::{
    PhotofragError,
    Result,
};
use std::path::{
    Path,
    PathBuf,
};
use tracing::info;

pub const DEFAULT_SCAN_EXTENSION: &str = ".mzML";

/// Lists the files in `directory` whose name ends with `extension`
/// (case sensitive).
///
/// The order is whatever the file system listing gives, it is NOT sorted
/// and in particular not sorted by wavelength.
pub fn list_scan_files(directory: &Path, extension: &str) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(directory).map_err(|e| PhotofragError::io(e, directory))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PhotofragError::io(e, directory))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(extension));
        if matches {
            files.push(path);
        }
    }

    if files.is_empty() {
        return Err(PhotofragError::NoInputFiles {
            directory: directory.to_path_buf(),
            extension: extension.to_string(),
        });
    }
    info!(
        "Found {} '{}' files in {}",
        files.len(),
        extension,
        directory.display()
    );
    Ok(files)
}
