use core::f64::consts::PI;

use super::Distribution;
use crate::error::{Error, Result};

/// A Gaussian distribution centered on `loc` with standard deviation `scale`.
///
/// The distribution is unbounded: every real value has a non-zero density,
/// shrinking with the distance to `loc`.
///
/// ```text
/// P(x) = exp(-(x - loc)² / (2 scale²)) / (sqrt(2π) scale)
/// ```
///
/// Unlike a bare density formula, construction rejects a non-positive
/// `scale`, which would otherwise yield `NaN` or infinite densities.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "NormalDto", try_from = "NormalDto")
)]
pub struct Normal {
    loc: f64,
    scale: f64,
}

impl Normal {
    /// Creates a normal distribution with mean `loc` and standard deviation `scale`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScale`] if `scale` is not a positive finite number.
    pub fn new(loc: f64, scale: f64) -> Result<Self> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(Error::InvalidScale(scale));
        }
        trace_debug!(loc, scale, "normal distribution created");
        Ok(Self { loc, scale })
    }

    /// The mean of the distribution.
    #[must_use]
    pub fn loc(&self) -> f64 {
        self.loc
    }

    /// The standard deviation of the distribution.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Distribution for Normal {
    fn pdf(&self, x: f64) -> f64 {
        let z = x - self.loc;
        (-z * z / (2.0 * self.scale * self.scale)).exp() / ((2.0 * PI).sqrt() * self.scale)
    }

    fn mean(&self) -> f64 {
        self.loc
    }

    // 3 * scale covers ~99.7% of the mass.
    fn plot_min_value(&self) -> f64 {
        self.loc - 3.0 * self.scale
    }

    fn plot_max_value(&self) -> f64 {
        self.loc + 3.0 * self.scale
    }

    fn plot_label(&self) -> String {
        format!("loc={}, scale={}", self.loc, self.scale)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct NormalDto {
    loc: f64,
    scale: f64,
}

#[cfg(feature = "serde")]
impl From<Normal> for NormalDto {
    fn from(dist: Normal) -> Self {
        Self {
            loc: dist.loc,
            scale: dist.scale,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<NormalDto> for Normal {
    type Error = Error;

    fn try_from(dto: NormalDto) -> Result<Self> {
        Self::new(dto.loc, dto.scale)
    }
}
