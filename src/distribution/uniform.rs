use super::Distribution;
use crate::error::{Error, Result};

/// A distribution in which every value in `[min_value, max_value]` is equally likely.
///
/// ```text
/// P(x) = 1 / (max - min)   if min <= x <= max
///        0                 otherwise
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "UniformDto", try_from = "UniformDto")
)]
pub struct Uniform {
    min_value: f64,
    max_value: f64,
}

impl Uniform {
    /// Creates a uniform distribution over `[min_value, max_value]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidBounds`] unless both bounds are finite,
    /// `min_value < max_value`, and the width `max_value - min_value` is
    /// finite.
    pub fn new(min_value: f64, max_value: f64) -> Result<Self> {
        if !min_value.is_finite()
            || !max_value.is_finite()
            || min_value >= max_value
            || !(max_value - min_value).is_finite()
        {
            return Err(Error::InvalidBounds {
                low: min_value,
                high: max_value,
            });
        }
        trace_debug!(min_value, max_value, "uniform distribution created");
        Ok(Self {
            min_value,
            max_value,
        })
    }

    /// The smallest value that can be drawn.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.min_value
    }

    /// The largest value that can be drawn.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.max_value
    }

    pub(crate) fn contains(&self, x: f64) -> bool {
        self.min_value <= x && x <= self.max_value
    }
}

impl Distribution for Uniform {
    fn pdf(&self, x: f64) -> f64 {
        if self.contains(x) {
            1.0 / (self.max_value - self.min_value)
        } else {
            0.0
        }
    }

    fn mean(&self) -> f64 {
        0.5 * (self.min_value + self.max_value)
    }

    fn plot_min_value(&self) -> f64 {
        self.min_value - 1.0
    }

    fn plot_max_value(&self) -> f64 {
        self.max_value + 1.0
    }

    fn plot_label(&self) -> String {
        format!("min={}, max={}", self.min_value, self.max_value)
    }
}

/// Wire form of [`Uniform`]; decoding goes through [`Uniform::new`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct UniformDto {
    min_value: f64,
    max_value: f64,
}

#[cfg(feature = "serde")]
impl From<Uniform> for UniformDto {
    fn from(dist: Uniform) -> Self {
        Self {
            min_value: dist.min_value,
            max_value: dist.max_value,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<UniformDto> for Uniform {
    type Error = Error;

    fn try_from(dto: UniformDto) -> Result<Self> {
        Self::new(dto.min_value, dto.max_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_or_inverted_range() {
        assert!(matches!(
            Uniform::new(5.0, 5.0),
            Err(Error::InvalidBounds { .. })
        ));
        assert!(matches!(
            Uniform::new(5.0, 1.0),
            Err(Error::InvalidBounds { .. })
        ));
        assert!(Uniform::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn rejects_infinite_bounds() {
        assert!(matches!(
            Uniform::new(0.0, f64::INFINITY),
            Err(Error::InvalidBounds { .. })
        ));
        assert!(matches!(
            Uniform::new(f64::NEG_INFINITY, 0.0),
            Err(Error::InvalidBounds { .. })
        ));
    }

    #[test]
    fn rejects_overflowing_width() {
        assert!(matches!(
            Uniform::new(-f64::MAX, f64::MAX),
            Err(Error::InvalidBounds { .. })
        ));
        let widest = Uniform::new(-f64::MAX / 2.0, f64::MAX / 2.0).unwrap();
        assert!(widest.pdf(0.0) > 0.0);
    }

    #[test]
    fn density_is_constant_inside_support() {
        let dist = Uniform::new(-2.0, 6.0).unwrap();
        for x in [-2.0, -1.0, 0.0, 3.3, 6.0] {
            assert!((dist.pdf(x) - 0.125).abs() < f64::EPSILON, "x={x}");
        }
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn density_is_zero_outside_support() {
        let dist = Uniform::new(-2.0, 6.0).unwrap();
        assert_eq!(dist.pdf(-2.000_001), 0.0);
        assert_eq!(dist.pdf(6.000_001), 0.0);
        assert_eq!(dist.pdf(100.0), 0.0);
    }

    #[test]
    fn mean_is_midpoint() {
        let dist = Uniform::new(1.0, 4.0).unwrap();
        assert!((dist.mean() - 2.5).abs() < f64::EPSILON);
    }

    #[test]
    fn plot_hints_pad_the_support() {
        let dist = Uniform::new(0.0, 1.5).unwrap();
        assert!((dist.plot_min_value() + 1.0).abs() < f64::EPSILON);
        assert!((dist.plot_max_value() - 2.5).abs() < f64::EPSILON);
        assert_eq!(dist.plot_label(), "min=0, max=1.5");
    }
}
