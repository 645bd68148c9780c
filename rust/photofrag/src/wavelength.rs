use crate::errors::{
    PhotofragError,
    Result,
};
use once_cell::sync::Lazy;
use regex::Regex;

const WAVELENGTH_MARKER: &str = "Laser";

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("Valid regex"));

/// Extracts the wavelength label from a scan file name.
///
/// The label is the last run of digits after the last occurrence of
/// `Laser` in the name. Note that this means any digits after the
/// wavelength win: `Laser400nm_rep2.mzML` gives `"2"`.
///
/// ```
/// use photofrag::wavelength::parse_wavelength_label;
///
/// assert_eq!(parse_wavelength_label("UVPD_Laser 425.mzML").unwrap(), "425");
/// assert!(parse_wavelength_label("UVPD_425.mzML").is_err());
/// ```
pub fn parse_wavelength_label(name: &str) -> Result<&str> {
    let err = || PhotofragError::WavelengthParseError {
        name: name.to_string(),
    };
    let (_, tail) = name.rsplit_once(WAVELENGTH_MARKER).ok_or_else(err)?;
    DIGITS
        .find_iter(tail)
        .last()
        .map(|m| m.as_str())
        .ok_or_else(err)
}

/// Same as [`parse_wavelength_label`] but as a number, in nm.
pub fn parse_wavelength(name: &str) -> Result<f64> {
    let label = parse_wavelength_label(name)?;
    label
        .parse::<f64>()
        .map_err(|_| PhotofragError::WavelengthParseError {
            name: name.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_wavelength() {
        assert_eq!(parse_wavelength("Sample_Laser400.mzML").unwrap(), 400.0);
        assert_eq!(parse_wavelength("CV21_Laser_OPO_212nm.mzML").unwrap(), 212.0);
        // Only what follows the last marker counts
        assert_eq!(
            parse_wavelength("Laser1_run_Laser_515.mzML").unwrap(),
            515.0
        );
        // Last run of digits wins
        assert_eq!(parse_wavelength("Laser400nm_rep2.mzML").unwrap(), 2.0);
    }

    #[test]
    fn test_parse_wavelength_errors() {
        assert!(matches!(
            parse_wavelength("Sample_400.mzML"),
            Err(PhotofragError::WavelengthParseError { .. })
        ));
        assert!(matches!(
            parse_wavelength("Sample_Laser.mzML"),
            Err(PhotofragError::WavelengthParseError { .. })
        ));
    }
}
