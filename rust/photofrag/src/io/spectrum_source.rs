use crate::errors::{
    PhotofragError,
    Result,
};
use crate::models::Spectrum;
use mzdata::MZReader;
use mzdata::prelude::MZFileReader as _;
use mzdata::spectrum::bindata::ArrayRetrievalError;
use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};
use tracing::debug;

pub type SpectrumIter<'a> = Box<dyn Iterator<Item = Result<Spectrum>> + 'a>;

/// Something that can give back the scans of a scan file, in file order.
///
/// Calling [`SpectrumSource::spectra`] again on the same file starts over.
pub trait SpectrumSource: Sync {
    fn spectra<'a>(&'a self, file: &Path) -> Result<SpectrumIter<'a>>;
}

/// Reads scans from mzML files.
#[derive(Debug, Default, Clone, Copy)]
pub struct MzmlSource;

impl SpectrumSource for MzmlSource {
    fn spectra<'a>(&'a self, file: &Path) -> Result<SpectrumIter<'a>> {
        debug!("Opening mzML file {}", file.display());
        let reader = MZReader::open_path(file).map_err(|e| PhotofragError::SpectrumRead {
            path: file.to_path_buf(),
            reason: e.to_string(),
        })?;

        let path = file.to_path_buf();
        let iter = reader.enumerate().map(move |(i, spectrum)| {
            let read_err = |reason: String| PhotofragError::SpectrumRead {
                path: path.clone(),
                reason: format!("scan {}: {}", i + 1, reason),
            };

            // A scan without binary arrays is kept as an empty scan, it is
            // rejected later on with the rest of the malformed scans.
            let Some(arrays) = spectrum.arrays.as_ref() else {
                return Ok(Spectrum::default());
            };
            let mz = match arrays.mzs() {
                Ok(mz) => mz.to_vec(),
                Err(ArrayRetrievalError::NotFound(_)) => return Ok(Spectrum::default()),
                Err(e) => return Err(read_err(format!("unable to decode the m/z array ({:?})", e))),
            };
            let intensity = arrays
                .intensities()
                .map_err(|e| read_err(format!("unable to decode the intensity array ({:?})", e)))?
                .iter()
                .map(|&x| x as f64)
                .collect();
            Ok(Spectrum::new(mz, intensity))
        });

        Ok(Box::new(iter))
    }
}

/// Keeps scans in memory, keyed by file path.
///
/// Mainly useful for testing and for callers that already have the
/// arrays decoded.
#[derive(Debug, Default, Clone)]
pub struct InMemorySource {
    files: HashMap<PathBuf, Vec<Spectrum>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file: impl Into<PathBuf>, spectra: Vec<Spectrum>) {
        self.files.insert(file.into(), spectra);
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>, spectra: Vec<Spectrum>) -> Self {
        self.insert(file, spectra);
        self
    }
}

impl SpectrumSource for InMemorySource {
    fn spectra<'a>(&'a self, file: &Path) -> Result<SpectrumIter<'a>> {
        let spectra = self
            .files
            .get(file)
            .ok_or_else(|| PhotofragError::SpectrumRead {
                path: file.to_path_buf(),
                reason: "file not found".to_string(),
            })?;
        Ok(Box::new(spectra.iter().cloned().map(Ok)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_source_is_restartable() {
        let source = InMemorySource::new().with_file(
            "a_Laser400.mzML",
            vec![
                Spectrum::new(vec![1.0], vec![2.0]),
                Spectrum::new(vec![3.0], vec![4.0]),
            ],
        );
        let path = Path::new("a_Laser400.mzML");
        let first: Vec<_> = source.spectra(path).unwrap().collect::<Result<_>>().unwrap();
        let second: Vec<_> = source.spectra(path).unwrap().collect::<Result<_>>().unwrap();
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert!(source.spectra(Path::new("missing.mzML")).is_err());
    }

    #[test]
    fn test_mzml_source_reads_arrays() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("data")
            .join("Sample_Laser425.mzML");
        let scans: Vec<Spectrum> = MzmlSource
            .spectra(&path)
            .unwrap()
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(scans.len(), 3);
        assert_eq!(scans[0].mz, vec![100.0, 100.5, 101.25]);
        // Stored as 32-bit floats, exact after widening.
        assert_eq!(scans[0].intensity, vec![10.0, 20.5, 0.25]);
        assert_eq!(scans[1].mz, vec![200.0, 250.0]);
        assert_eq!(scans[1].intensity, vec![1.5, 3.0]);
        // No binary arrays at all
        assert!(scans[2].is_empty());

        // Restartable, like any other source.
        assert_eq!(MzmlSource.spectra(&path).unwrap().count(), 3);
    }

    #[test]
    fn test_mzml_source_missing_file() {
        let res = MzmlSource.spectra(Path::new("/definitely/not/here_Laser400.mzML"));
        assert!(matches!(res, Err(PhotofragError::SpectrumRead { .. })));
    }
}
