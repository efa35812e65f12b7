//! Rounding of continuous values onto a lattice of step `q`.
//!
//! [`Quantization`] is shared by every quantized distribution (see
//! [`Quantized`](crate::distribution::Quantized)). Rounding uses
//! [`f64::round`], which rounds half-way cases away from zero:
//! with `q = 1.0`, `2.5` becomes `3.0` and `-2.5` becomes `-3.0`.
//!
//! # Example
//!
//! ```
//! use autoopt::quantization::Quantization;
//!
//! let quant = Quantization::new(0.25).unwrap();
//! assert_eq!(quant.round_to_q(0.3), 0.25);
//! assert_eq!(quant.round_to_q(0.4), 0.5);
//! ```

use crate::error::{Error, Result};

/// A validated quantization step.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "QuantizationDto", try_from = "QuantizationDto")
)]
pub struct Quantization {
    q: f64,
}

impl Quantization {
    /// Creates a quantization policy with step `q`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStep`] if `q` is not a positive finite number.
    pub fn new(q: f64) -> Result<Self> {
        if !q.is_finite() || q <= 0.0 {
            return Err(Error::InvalidStep(q));
        }
        Ok(Self { q })
    }

    /// The step size of the lattice.
    #[must_use]
    pub fn q(&self) -> f64 {
        self.q
    }

    /// Rounds `value` to the nearest multiple of `q`.
    #[must_use]
    pub fn round_to_q(&self, value: f64) -> f64 {
        (value / self.q).round() * self.q
    }
}

/// Rounds `value` to the nearest multiple of `q` without keeping a policy around.
///
/// # Errors
///
/// Returns [`Error::InvalidStep`] if `q` is not a positive finite number.
pub fn round_to_q(value: f64, q: f64) -> Result<f64> {
    Ok(Quantization::new(q)?.round_to_q(value))
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct QuantizationDto {
    q: f64,
}

#[cfg(feature = "serde")]
impl From<Quantization> for QuantizationDto {
    fn from(quantization: Quantization) -> Self {
        Self { q: quantization.q }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<QuantizationDto> for Quantization {
    type Error = Error;

    fn try_from(dto: QuantizationDto) -> Result<Self> {
        Self::new(dto.q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_step() {
        assert!(matches!(Quantization::new(0.0), Err(Error::InvalidStep(_))));
        assert!(matches!(Quantization::new(-0.5), Err(Error::InvalidStep(_))));
        assert!(Quantization::new(f64::NAN).is_err());
        assert!(Quantization::new(f64::INFINITY).is_err());
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn rounds_to_nearest_multiple() {
        let quant = Quantization::new(1.0).unwrap();
        assert_eq!(quant.round_to_q(3.4), 3.0);
        assert_eq!(quant.round_to_q(3.6), 4.0);
        assert_eq!(quant.round_to_q(-3.6), -4.0);

        let quant = Quantization::new(5.0).unwrap();
        assert_eq!(quant.round_to_q(12.0), 10.0);
        assert_eq!(quant.round_to_q(13.0), 15.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn half_way_rounds_away_from_zero() {
        let quant = Quantization::new(1.0).unwrap();
        assert_eq!(quant.round_to_q(2.5), 3.0);
        assert_eq!(quant.round_to_q(-2.5), -3.0);
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn rounding_is_idempotent() {
        for q in [0.1, 0.25, 0.3, 1.0, 7.5] {
            let quant = Quantization::new(q).unwrap();
            for i in -50..50 {
                let v = f64::from(i) * 0.37;
                let once = quant.round_to_q(v);
                assert_eq!(quant.round_to_q(once), once, "q={q}, v={v}");
            }
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn free_function_matches_policy() {
        assert_eq!(round_to_q(0.74, 0.5).unwrap(), 0.5);
        assert!(round_to_q(1.0, 0.0).is_err());
    }
}
