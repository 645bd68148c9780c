use crate::errors::{
    PhotofragError,
    Result,
};
use crate::models::IntegrationResult;
use crate::utils::mean;

impl IntegrationResult {
    /// Mean and population standard deviation (divides by N) of the
    /// per-scan areas.
    pub fn from_areas(areas: &[f64]) -> Result<Self> {
        let mean = mean(areas).ok_or_else(|| PhotofragError::NoScansFound {
            context: String::new(),
        })?;
        let variance = areas.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / areas.len() as f64;
        Ok(Self {
            mean,
            std_dev: variance.sqrt(),
        })
    }
}

/// Collects the per-scan areas of several windows over one file.
///
/// Areas are kept around (instead of streaming a running mean) so the
/// final statistics match the two-pass closed form exactly.
#[derive(Debug, Clone)]
pub struct ScanAggregator {
    areas: Vec<Vec<f64>>,
    num_scans: usize,
}

impl ScanAggregator {
    pub fn new(num_windows: usize) -> Self {
        Self {
            areas: vec![Vec::new(); num_windows],
            num_scans: 0,
        }
    }

    /// Adds the areas of one scan, one per window (in window order).
    /// The length is only checked in debug builds.
    pub fn add_scan(&mut self, scan_areas: &[f64]) {
        debug_assert_eq!(
            scan_areas.len(),
            self.areas.len(),
            "One area per window is expected"
        );
        for (acc, area) in self.areas.iter_mut().zip(scan_areas.iter()) {
            acc.push(*area);
        }
        self.num_scans += 1;
    }

    pub fn num_scans(&self) -> usize {
        self.num_scans
    }

    pub fn finish(self) -> Result<Vec<IntegrationResult>> {
        if self.num_scans == 0 {
            return Err(PhotofragError::NoScansFound {
                context: String::new(),
            });
        }
        self.areas
            .iter()
            .map(|areas| IntegrationResult::from_areas(areas))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_population_statistics() {
        let res = IntegrationResult::from_areas(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert_eq!(res.mean, 5.0);
        assert_eq!(res.std_dev, 2.0);
    }

    #[test]
    fn test_single_scan_has_zero_std() {
        let res = IntegrationResult::from_areas(&[3.5]).unwrap();
        assert_eq!(res.mean, 3.5);
        assert_eq!(res.std_dev, 0.0);
    }

    #[test]
    fn test_empty_is_error() {
        assert!(matches!(
            IntegrationResult::from_areas(&[]),
            Err(PhotofragError::NoScansFound { .. })
        ));
        assert!(matches!(
            ScanAggregator::new(2).finish(),
            Err(PhotofragError::NoScansFound { .. })
        ));
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "One area per window")]
    fn test_wrong_area_count_is_caught_in_debug() {
        let mut agg = ScanAggregator::new(2);
        agg.add_scan(&[1.0]);
    }

    #[test]
    fn test_aggregator_keeps_windows_apart() {
        let mut agg = ScanAggregator::new(2);
        agg.add_scan(&[1.0, 10.0]);
        agg.add_scan(&[3.0, 10.0]);
        assert_eq!(agg.num_scans(), 2);

        let results = agg.finish().unwrap();
        assert_eq!(
            results[0],
            IntegrationResult {
                mean: 2.0,
                std_dev: 1.0
            }
        );
        assert_eq!(
            results[1],
            IntegrationResult {
                mean: 10.0,
                std_dev: 0.0
            }
        );
    }
}
