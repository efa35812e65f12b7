use super::{Distribution, Uniform};
use crate::error::{Error, Result};

/// A distribution whose logarithm is uniformly distributed.
///
/// Useful for scale-like parameters such as learning rates, where
/// `1e-4..1e-3` should be as likely as `1e-2..1e-1`. Only defined for
/// strictly positive intervals.
///
/// ```text
/// P(x) = 1 / (x (ln max - ln min))   if 0 <= x and min <= x <= max
///        0                           otherwise
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "LogUniformDto", try_from = "LogUniformDto")
)]
pub struct LogUniform {
    range: Uniform,
    min_log: f64,
    max_log: f64,
}

impl LogUniform {
    /// Creates a log-uniform distribution over `[min_value, max_value]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLogBounds`] if `min_value <= 0`, and
    /// [`Error::InvalidBounds`] unless `min_value < max_value`.
    pub fn new(min_value: f64, max_value: f64) -> Result<Self> {
        if min_value <= 0.0 {
            return Err(Error::InvalidLogBounds(min_value));
        }
        let range = Uniform::new(min_value, max_value)?;
        Ok(Self {
            range,
            min_log: min_value.ln(),
            max_log: max_value.ln(),
        })
    }

    /// The smallest value that can be drawn.
    #[must_use]
    pub fn min_value(&self) -> f64 {
        self.range.min_value()
    }

    /// The largest value that can be drawn.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.range.max_value()
    }

    /// `ln(min_value)`.
    #[must_use]
    pub fn min_log(&self) -> f64 {
        self.min_log
    }

    /// `ln(max_value)`.
    #[must_use]
    pub fn max_log(&self) -> f64 {
        self.max_log
    }
}

impl Distribution for LogUniform {
    fn pdf(&self, x: f64) -> f64 {
        if x >= 0.0 && self.range.contains(x) {
            1.0 / (x * (self.max_log - self.min_log))
        } else {
            0.0
        }
    }

    fn mean(&self) -> f64 {
        (self.max_value() - self.min_value()) / (self.max_log - self.min_log)
    }

    fn plot_min_value(&self) -> f64 {
        self.range.plot_min_value()
    }

    fn plot_max_value(&self) -> f64 {
        self.range.plot_max_value()
    }

    fn plot_label(&self) -> String {
        self.range.plot_label()
    }
}

/// Wire form of [`LogUniform`]. The log bounds are recomputed on decoding.
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct LogUniformDto {
    min_value: f64,
    max_value: f64,
}

#[cfg(feature = "serde")]
impl From<LogUniform> for LogUniformDto {
    fn from(dist: LogUniform) -> Self {
        Self {
            min_value: dist.min_value(),
            max_value: dist.max_value(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<LogUniformDto> for LogUniform {
    type Error = Error;

    fn try_from(dto: LogUniformDto) -> Result<Self> {
        Self::new(dto.min_value, dto.max_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_min() {
        assert!(matches!(
            LogUniform::new(-1.0, 1.0),
            Err(Error::InvalidLogBounds(_))
        ));
        assert!(matches!(
            LogUniform::new(0.0, 1.0),
            Err(Error::InvalidLogBounds(_))
        ));
    }

    #[test]
    fn rejects_inverted_range() {
        assert!(matches!(
            LogUniform::new(10.0, 1.0),
            Err(Error::InvalidBounds { .. })
        ));
        assert!(LogUniform::new(2.0, 2.0).is_err());
    }

    #[test]
    fn derives_log_bounds() {
        let dist = LogUniform::new(1.0, core::f64::consts::E).unwrap();
        assert!(dist.min_log().abs() < f64::EPSILON);
        assert!((dist.max_log() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn density_follows_reciprocal() {
        let dist = LogUniform::new(1.0, 100.0).unwrap();
        let log_range = 100f64.ln();
        for x in [1.0, 2.0, 10.0, 50.0, 100.0] {
            let expected = 1.0 / (x * log_range);
            assert!((dist.pdf(x) - expected).abs() < 1e-15, "x={x}");
        }
        assert!(dist.pdf(2.0) > dist.pdf(20.0));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn density_is_zero_outside_support() {
        let dist = LogUniform::new(0.5, 4.0).unwrap();
        assert_eq!(dist.pdf(-1.0), 0.0);
        assert_eq!(dist.pdf(0.0), 0.0);
        assert_eq!(dist.pdf(0.49), 0.0);
        assert_eq!(dist.pdf(4.01), 0.0);
    }

    #[test]
    fn mean_uses_range_over_log_range() {
        let dist = LogUniform::new(1.0, 10.0).unwrap();
        let expected = 9.0 / 10f64.ln();
        assert!((dist.mean() - expected).abs() < 1e-12);
    }
}
