use super::{Distribution, Normal};
use crate::error::Result;

/// A distribution whose logarithm is normally distributed.
///
/// `loc` and `scale` describe the underlying normal distribution of
/// `ln(X)`, not the mean and standard deviation of `X` itself. Negative
/// values and zero have zero density.
///
/// ```text
/// P(x) = Normal(loc, scale).pdf(ln x) / x   if x > 0
///        0                                  otherwise
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "LogNormalDto", try_from = "LogNormalDto")
)]
pub struct LogNormal {
    inner: Normal,
}

impl LogNormal {
    /// Creates a log-normal distribution from the parameters of `ln(X)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScale`](crate::Error::InvalidScale) if
    /// `scale` is not a positive finite number.
    pub fn new(loc: f64, scale: f64) -> Result<Self> {
        Ok(Self {
            inner: Normal::new(loc, scale)?,
        })
    }

    /// The mean of `ln(X)`.
    #[must_use]
    pub fn loc(&self) -> f64 {
        self.inner.loc()
    }

    /// The standard deviation of `ln(X)`.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.inner.scale()
    }
}

impl Distribution for LogNormal {
    fn pdf(&self, x: f64) -> f64 {
        if x > 0.0 {
            self.inner.pdf(x.ln()) / x
        } else {
            0.0
        }
    }

    fn mean(&self) -> f64 {
        let scale = self.scale();
        (self.loc() + scale * scale / 2.0).exp()
    }

    fn plot_min_value(&self) -> f64 {
        0.0
    }

    fn plot_max_value(&self) -> f64 {
        self.inner.plot_max_value().exp()
    }

    fn plot_label(&self) -> String {
        self.inner.plot_label()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct LogNormalDto {
    loc: f64,
    scale: f64,
}

#[cfg(feature = "serde")]
impl From<LogNormal> for LogNormalDto {
    fn from(dist: LogNormal) -> Self {
        Self {
            loc: dist.loc(),
            scale: dist.scale(),
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<LogNormalDto> for LogNormal {
    type Error = crate::Error;

    fn try_from(dto: LogNormalDto) -> Result<Self> {
        Self::new(dto.loc, dto.scale)
    }
}
