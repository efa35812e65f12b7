use super::{Distribution, LogNormal, LogUniform, Normal, Uniform};
use crate::error::Result;
use crate::quantization::Quantization;

/// A continuous distribution restricted to multiples of a step `q`.
///
/// Wraps any [`Distribution`] and applies the same rule to all of them:
///
/// - `pdf(x) = base.pdf(round_to_q(x))`: the query point is snapped onto
///   the lattice before the density lookup;
/// - `mean() = round_to_q(base.mean())`: the unquantized mean is computed
///   first, then snapped.
///
/// The base distribution keeps its own construction checks, so a
/// `QUniform` still needs `min_value < max_value`.
///
/// # Example
///
/// ```
/// use autoopt::distribution::{Distribution, Normal, QNormal, Quantized};
///
/// let qnormal = QNormal::new(0.3, 1.0, 0.5).unwrap();
/// assert_eq!(qnormal.mean(), 0.5);
///
/// // Any distribution can be quantized, not only the predefined aliases.
/// let wrapped = Quantized::with_step(Normal::new(0.3, 1.0).unwrap(), 0.5).unwrap();
/// assert_eq!(wrapped, qnormal);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quantized<D> {
    base: D,
    quantization: Quantization,
}

/// A [`Uniform`] distribution bound to multiples of `q`.
pub type QUniform = Quantized<Uniform>;
/// A [`LogUniform`] distribution bound to multiples of `q`.
pub type QLogUniform = Quantized<LogUniform>;
/// A [`Normal`] distribution bound to multiples of `q`.
pub type QNormal = Quantized<Normal>;
/// A [`LogNormal`] distribution bound to multiples of `q`.
pub type QLogNormal = Quantized<LogNormal>;

impl<D: Distribution> Quantized<D> {
    /// Wraps `base` with an already validated quantization policy.
    #[must_use]
    pub fn from_parts(base: D, quantization: Quantization) -> Self {
        Self { base, quantization }
    }

    /// Wraps `base` with step `q`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidStep`](crate::Error::InvalidStep) if `q` is
    /// not a positive finite number.
    pub fn with_step(base: D, q: f64) -> Result<Self> {
        Ok(Self::from_parts(base, Quantization::new(q)?))
    }

    /// The unquantized distribution.
    #[must_use]
    pub fn base(&self) -> &D {
        &self.base
    }

    /// The quantization policy.
    #[must_use]
    pub fn quantization(&self) -> Quantization {
        self.quantization
    }

    /// The step size.
    #[must_use]
    pub fn q(&self) -> f64 {
        self.quantization.q()
    }

    /// Rounds `value` to the nearest multiple of [`q`](Self::q).
    #[must_use]
    pub fn round_to_q(&self, value: f64) -> f64 {
        self.quantization.round_to_q(value)
    }
}

impl<D: Distribution> Distribution for Quantized<D> {
    fn pdf(&self, x: f64) -> f64 {
        self.base.pdf(self.round_to_q(x))
    }

    fn mean(&self) -> f64 {
        self.round_to_q(self.base.mean())
    }

    fn plot_min_value(&self) -> f64 {
        self.round_to_q(self.base.plot_min_value()) - 2.0 * self.q()
    }

    fn plot_max_value(&self) -> f64 {
        self.round_to_q(self.base.plot_max_value()) + 2.0 * self.q()
    }

    fn plot_label(&self) -> String {
        format!("{}, q={}", self.base.plot_label(), self.q())
    }
}

impl QUniform {
    /// Creates a quantized [`Uniform`] distribution.
    ///
    /// # Errors
    ///
    /// Returns the [`Uniform::new`] errors, or
    /// [`Error::InvalidStep`](crate::Error::InvalidStep) for a bad `q`.
    pub fn new(min_value: f64, max_value: f64, q: f64) -> Result<Self> {
        Self::with_step(Uniform::new(min_value, max_value)?, q)
    }
}

impl QLogUniform {
    /// Creates a quantized [`LogUniform`] distribution.
    ///
    /// # Errors
    ///
    /// Returns the [`LogUniform::new`] errors, or
    /// [`Error::InvalidStep`](crate::Error::InvalidStep) for a bad `q`.
    pub fn new(min_value: f64, max_value: f64, q: f64) -> Result<Self> {
        Self::with_step(LogUniform::new(min_value, max_value)?, q)
    }
}

impl QNormal {
    /// Creates a quantized [`Normal`] distribution.
    ///
    /// # Errors
    ///
    /// Returns the [`Normal::new`] errors, or
    /// [`Error::InvalidStep`](crate::Error::InvalidStep) for a bad `q`.
    pub fn new(loc: f64, scale: f64, q: f64) -> Result<Self> {
        Self::with_step(Normal::new(loc, scale)?, q)
    }
}

impl QLogNormal {
    /// Creates a quantized [`LogNormal`] distribution.
    ///
    /// # Errors
    ///
    /// Returns the [`LogNormal::new`] errors, or
    /// [`Error::InvalidStep`](crate::Error::InvalidStep) for a bad `q`.
    pub fn new(loc: f64, scale: f64, q: f64) -> Result<Self> {
        Self::with_step(LogNormal::new(loc, scale)?, q)
    }
}
