//! Photofragmentation efficiency (PE) and its propagated uncertainty.
//!
//! For a parent area `Par` and a fragment area `Frag`:
//!
//! ```text
//! PE          = -ln(Par / (Par + Frag))
//! PE (power)  = -(W / P) * ln(Par / (Par + Frag))
//! ```
//!
//! Uncertainties are propagated assuming independent errors (quadrature
//! sum of the first order terms). The power normalized form also accounts
//! for the linewidth of the laser, [`LASER_BANDWIDTH_NM`].

use crate::errors::{
    PhotofragError,
    Result,
};
use crate::models::{
    Efficiency,
    IntegrationResult,
};
use tracing::warn;

/// Nominal +/- linewidth of the tunable source, in nm.
pub const LASER_BANDWIDTH_NM: f64 = 2.0;

/// Everything a single efficiency calculation needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EfficiencyInputs {
    pub wavelength: f64,
    pub power: f64,
    pub power_std: f64,
    pub parent: IntegrationResult,
    pub fragment: IntegrationResult,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EfficiencyModel {
    PowerNormalized,
    #[default]
    Unnormalized,
}

impl EfficiencyModel {
    pub fn compute(&self, inputs: &EfficiencyInputs) -> Result<Efficiency> {
        let EfficiencyInputs {
            wavelength,
            power,
            power_std,
            parent,
            fragment,
        } = *inputs;
        let out = match self {
            EfficiencyModel::PowerNormalized => power_normalized_efficiency(
                wavelength,
                power,
                power_std,
                parent.mean,
                parent.std_dev,
                fragment.mean,
                fragment.std_dev,
            ),
            EfficiencyModel::Unnormalized => unnormalized_efficiency(
                wavelength,
                power,
                power_std,
                parent.mean,
                parent.std_dev,
                fragment.mean,
                fragment.std_dev,
            ),
        }?;

        if !out.value.is_finite() || !out.std_dev.is_finite() {
            warn!(
                "Non-finite efficiency at {}nm: {} +/- {} (parent area {}, fragment area {})",
                wavelength, out.value, out.std_dev, parent.mean, fragment.mean
            );
        }
        Ok(out)
    }
}

fn division_by_zero(wavelength: f64, power: f64, parent: f64, fragment: f64) -> PhotofragError {
    PhotofragError::DivisionByZero {
        wavelength,
        power,
        parent_area: parent,
        fragment_area: fragment,
        context: String::new(),
    }
}

/// Efficiency normalized to laser power.
///
/// Fails if `power` or `parent + fragment` is zero.
pub fn power_normalized_efficiency(
    wavelength: f64,
    power: f64,
    power_std: f64,
    parent: f64,
    parent_std: f64,
    fragment: f64,
    fragment_std: f64,
) -> Result<Efficiency> {
    let total = parent + fragment;
    if power == 0.0 || total == 0.0 {
        return Err(division_by_zero(wavelength, power, parent, fragment));
    }

    let log_ratio = (parent / total).ln();
    let value = -(wavelength / power) * log_ratio;

    let term1 = ((log_ratio / -power) * LASER_BANDWIDTH_NM).powi(2);
    let term2 = ((wavelength * log_ratio / power.powi(2)) * power_std).powi(2);
    let term3 = (-(wavelength * fragment) / (total * power * parent) * parent_std).powi(2);
    let term4 = ((wavelength / (total * power)) * fragment_std).powi(2);

    Ok(Efficiency {
        value,
        std_dev: (term1 + term2 + term3 + term4).sqrt(),
    })
}

/// Efficiency without laser power normalization.
///
/// `wavelength`, `power` and `power_std` are not used, they are accepted so
/// both variants share a signature. Fails if `parent + fragment` is zero.
pub fn unnormalized_efficiency(
    wavelength: f64,
    power: f64,
    _power_std: f64,
    parent: f64,
    parent_std: f64,
    fragment: f64,
    fragment_std: f64,
) -> Result<Efficiency> {
    let total = parent + fragment;
    if total == 0.0 {
        return Err(division_by_zero(wavelength, power, parent, fragment));
    }

    let value = -(parent / total).ln();
    let term1 = (-(fragment / total / parent) * parent_std).powi(2);
    let term2 = ((1.0 / total) * fragment_std).powi(2);

    Ok(Efficiency {
        value,
        std_dev: (term1 + term2).sqrt(),
    })
}

/// Sum of the channel areas, with the standard deviations combined in
/// quadrature.
pub fn combine_fragment_channels(channels: &[IntegrationResult]) -> IntegrationResult {
    IntegrationResult {
        mean: channels.iter().map(|c| c.mean).sum(),
        std_dev: channels
            .iter()
            .map(|c| c.std_dev.powi(2))
            .sum::<f64>()
            .sqrt(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LN_2: f64 = std::f64::consts::LN_2;

    #[test]
    fn test_unnormalized_equal_areas_is_ln2() {
        let eff = unnormalized_efficiency(400.0, 0.0, 0.0, 5.0, 0.0, 5.0, 0.0).unwrap();
        assert!((eff.value - LN_2).abs() < 1e-12);
        assert!((eff.value - 0.693147).abs() < 1e-6);
        assert_eq!(eff.std_dev, 0.0);
    }

    #[test]
    fn test_unnormalized_no_fragment_is_zero() {
        let eff = unnormalized_efficiency(400.0, 0.0, 0.0, 5.0, 1.0, 0.0, 0.0).unwrap();
        assert_eq!(eff.value, 0.0);
        assert_eq!(eff.std_dev, 0.0);
    }

    #[test]
    fn test_unnormalized_uncertainty() {
        // Par = 3, Frag = 1, dPar = 0.3, dFrag = 0.2
        // term1 = (1/4/3 * 0.3)^2 = 0.025^2, term2 = (0.2/4)^2 = 0.05^2
        let eff = unnormalized_efficiency(400.0, 1.0, 1.0, 3.0, 0.3, 1.0, 0.2).unwrap();
        let expected = (0.025f64.powi(2) + 0.05f64.powi(2)).sqrt();
        assert!((eff.value - (4.0f64 / 3.0).ln()).abs() < 1e-12);
        assert!((eff.std_dev - expected).abs() < 1e-12);
    }

    #[test]
    fn test_power_normalized() {
        let (w, p, dp, par, dpar, frag, dfrag) = (400.0, 2.0, 0.1, 3.0, 0.3, 1.0, 0.2);
        let eff = power_normalized_efficiency(w, p, dp, par, dpar, frag, dfrag).unwrap();

        let log_ratio = (0.75f64).ln();
        assert!((eff.value - (-(w / p) * log_ratio)).abs() < 1e-9);

        let term1 = (log_ratio / -p * 2.0).powi(2);
        let term2 = (w * log_ratio / (p * p) * dp).powi(2);
        let term3 = (w * frag / (4.0 * p * par) * dpar).powi(2);
        let term4 = (w / (4.0 * p) * dfrag).powi(2);
        let expected = (term1 + term2 + term3 + term4).sqrt();
        assert!((eff.std_dev - expected).abs() < 1e-9);
    }

    #[test]
    fn test_power_normalized_equal_areas() {
        let eff = power_normalized_efficiency(400.0, 4.0, 0.0, 1.0, 0.0, 1.0, 0.0).unwrap();
        assert!((eff.value - 100.0 * LN_2).abs() < 1e-9);
        // Only the bandwidth term remains
        assert!((eff.std_dev - LN_2 / 4.0 * 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(
            unnormalized_efficiency(400.0, 1.0, 0.0, 1.0, 0.0, -1.0, 0.0),
            Err(PhotofragError::DivisionByZero { .. })
        ));
        assert!(matches!(
            power_normalized_efficiency(400.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0),
            Err(PhotofragError::DivisionByZero { .. })
        ));
        assert!(matches!(
            power_normalized_efficiency(400.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0),
            Err(PhotofragError::DivisionByZero { .. })
        ));
        // Zero power is fine without normalization
        assert!(unnormalized_efficiency(400.0, 0.0, 0.0, 1.0, 0.0, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_model_dispatch() {
        let inputs = EfficiencyInputs {
            wavelength: 400.0,
            power: 4.0,
            power_std: 0.0,
            parent: IntegrationResult {
                mean: 1.0,
                std_dev: 0.0,
            },
            fragment: IntegrationResult {
                mean: 1.0,
                std_dev: 0.0,
            },
        };
        let raw = EfficiencyModel::Unnormalized.compute(&inputs).unwrap();
        let norm = EfficiencyModel::PowerNormalized.compute(&inputs).unwrap();
        assert!((raw.value - LN_2).abs() < 1e-12);
        assert!((norm.value - 100.0 * LN_2).abs() < 1e-9);
    }

    #[test]
    fn test_combine_channels() {
        let combined = combine_fragment_channels(&[
            IntegrationResult {
                mean: 1.0,
                std_dev: 3.0,
            },
            IntegrationResult {
                mean: 2.0,
                std_dev: 4.0,
            },
        ]);
        assert_eq!(combined.mean, 3.0);
        assert_eq!(combined.std_dev, 5.0);
    }
}
