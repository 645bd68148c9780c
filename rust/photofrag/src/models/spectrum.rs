/// A single scan, as read from a scan file.
///
/// The arrays are expected to be the same length and can come in any
/// order. Nothing is validated on construction, the interpolation step is
/// the one that rejects malformed scans (with enough context to know which
/// scan it was).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum {
    pub mz: Vec<f64>,
    pub intensity: Vec<f64>,
}

impl Spectrum {
    pub fn new(mz: Vec<f64>, intensity: Vec<f64>) -> Self {
        Self { mz, intensity }
    }

    pub fn len(&self) -> usize {
        self.mz.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mz.is_empty()
    }

    /// Observed `(min, max)` m/z, `None` for an empty scan.
    pub fn mz_range(&self) -> Option<(f64, f64)> {
        if self.mz.is_empty() {
            return None;
        }
        Some(
            self.mz
                .iter()
                .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                    (lo.min(x), hi.max(x))
                }),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mz_range_unsorted() {
        let spec = Spectrum::new(vec![3.0, 1.0, 2.0], vec![0.0, 0.0, 0.0]);
        assert_eq!(spec.mz_range(), Some((1.0, 3.0)));
        assert_eq!(Spectrum::default().mz_range(), None);
    }
}
