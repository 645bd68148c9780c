use crate::errors::{
    PhotofragError,
    Result,
};
use crate::utils::round_to_decimals;
use serde::{
    Deserialize,
    Serialize,
};
use std::fmt::Display;
use std::str::FromStr;

/// A closed `[lower, upper]` m/z window to integrate over.
///
/// Serializes as a two element array, `[202.5, 203.5]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "(f64, f64)", into = "(f64, f64)")]
pub struct MassWindow {
    lower: f64,
    upper: f64,
}

impl MassWindow {
    pub fn try_new(lower: f64, upper: f64) -> Result<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(PhotofragError::InvalidWindow {
                input: format!("({}, {})", lower, upper),
                reason: "bounds must be finite numbers".to_string(),
            });
        }
        if lower > upper {
            return Err(PhotofragError::InvalidWindow {
                input: format!("({}, {})", lower, upper),
                reason: "the lower bound must not exceed the upper bound".to_string(),
            });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn center(&self) -> f64 {
        (self.lower + self.upper) / 2.0
    }

    /// Bounds as they are compared against the 2-decimal grid.
    pub fn rounded_bounds(&self) -> (f64, f64) {
        (
            round_to_decimals(self.lower, 2),
            round_to_decimals(self.upper, 2),
        )
    }

    /// Nominal m/z of a parent ion window: the window center to 2 decimals.
    pub fn parent_mz(&self) -> f64 {
        round_to_decimals(self.center(), 2)
    }

    /// Label used for a fragment channel in the output columns.
    /// The center rounded to an integer, printed with a trailing `.0`.
    pub fn channel_label(&self) -> String {
        format!("{:.1}", round_to_decimals(self.center(), 0))
    }
}

impl Display for MassWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}

impl TryFrom<(f64, f64)> for MassWindow {
    type Error = PhotofragError;

    fn try_from(value: (f64, f64)) -> Result<Self> {
        Self::try_new(value.0, value.1)
    }
}

impl From<MassWindow> for (f64, f64) {
    fn from(value: MassWindow) -> Self {
        (value.lower, value.upper)
    }
}

/// Parses `"202.5,203.5"`. Whitespace and a single pair of surrounding
/// brackets are tolerated.
impl FromStr for MassWindow {
    type Err = PhotofragError;

    fn from_str(s: &str) -> Result<Self> {
        let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        let inner = cleaned.trim_start_matches('(').trim_end_matches(')');

        let invalid = |reason: &str| PhotofragError::InvalidWindow {
            input: s.to_string(),
            reason: reason.to_string(),
        };

        if inner.is_empty() {
            return Err(invalid("the window is empty"));
        }
        if !inner.contains(',') {
            return Err(invalid("expected two comma separated numbers"));
        }

        let values = inner
            .split(',')
            .map(|x| x.parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|_| invalid("contains non-numeric characters"))?;

        match values.as_slice() {
            [lower, upper] => MassWindow::try_new(*lower, *upper).map_err(|e| match e {
                PhotofragError::InvalidWindow { reason, .. } => invalid(&reason),
                other => other,
            }),
            _ => Err(invalid(&format!(
                "expected exactly two numbers, got {}",
                values.len()
            ))),
        }
    }
}

/// Parses a list of windows written as `(50.5,51.5),(102.5,103.5)`.
pub fn parse_window_list(s: &str) -> Result<Vec<MassWindow>> {
    let cleaned: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    let invalid = |reason: &str| PhotofragError::InvalidWindow {
        input: s.to_string(),
        reason: reason.to_string(),
    };

    if cleaned.is_empty() {
        return Err(invalid("no fragment windows given"));
    }
    if !cleaned.contains(',') {
        return Err(invalid("no commas found, use the (lower,upper),(lower,upper) format"));
    }
    if !cleaned.contains('(') || !cleaned.contains(')') {
        return Err(invalid("no brackets found, use the (lower,upper),(lower,upper) format"));
    }

    cleaned
        .split("),(")
        .map(|pair| pair.trim_matches(|c| c == '(' || c == ')'))
        .map(MassWindow::from_str)
        .collect()
}
