//! Probability distributions used to declare hyperparameter search spaces.
//!
//! Every continuous distribution implements the [`Distribution`] trait,
//! which exposes the density ([`pdf`](Distribution::pdf)), the
//! [`mean`](Distribution::mean), and the range/label hints used by the
//! [`visualization`](crate::visualization) module. Quantized variants are
//! built by wrapping any continuous distribution in [`Quantized`].
//! Distributions over explicit finite sets are handled by
//! [`WeightedChoice`] and [`Choice`].
//!
//! # Available distributions
//!
//! | Distribution | Parameters | Support | Mean |
//! |---|---|---|---|
//! | [`Uniform`] | `min_value < max_value` | `[min, max]` | `(min + max) / 2` |
//! | [`LogUniform`] | `0 < min_value < max_value` | `[min, max]` | `(max - min) / (ln max - ln min)` |
//! | [`Normal`] | `loc`, `scale > 0` | all reals | `loc` |
//! | [`LogNormal`] | `loc`, `scale > 0` | `x > 0` | `exp(loc + scale² / 2)` |
//! | [`QUniform`], [`QLogUniform`], [`QNormal`], [`QLogNormal`] | base + `q > 0` | base | `round_to_q(base mean)` |
//! | [`WeightedChoice`] / [`Choice`] | ordered `(value, weight)` pairs | listed values | value at the rounded expected index |
//!
//! # Example
//!
//! ```
//! use autoopt::distribution::{Distribution, Normal, QUniform};
//!
//! let normal = Normal::new(0.0, 1.0).unwrap();
//! assert!(normal.pdf(0.0) > normal.pdf(1.0));
//!
//! let quniform = QUniform::new(0.0, 10.0, 1.0).unwrap();
//! assert_eq!(quniform.pdf(3.4), quniform.pdf(3.0));
//! assert_eq!(quniform.mean(), 5.0);
//! ```

mod choice;
mod log_normal;
mod log_uniform;
mod normal;
mod quantized;
mod uniform;

use core::fmt::Debug;

pub use choice::{Categorical, Choice, WeightedChoice};
pub use log_normal::LogNormal;
pub use log_uniform::LogUniform;
pub use normal::Normal;
pub use quantized::{QLogNormal, QLogUniform, QNormal, QUniform, Quantized};
pub use uniform::Uniform;

/// A continuous distribution over `f64` values.
///
/// Implementations are immutable value types: [`pdf`](Self::pdf) and
/// [`mean`](Self::mean) depend only on the construction parameters, so a
/// distribution can be queried from any number of threads at once.
pub trait Distribution: Debug + Send + Sync {
    /// Returns the probability density at `x`.
    ///
    /// The result is `0.0` outside the support of the distribution.
    fn pdf(&self, x: f64) -> f64;

    /// Returns the expected value of the distribution.
    fn mean(&self) -> f64;

    /// The smallest value to show when plotting the density.
    fn plot_min_value(&self) -> f64;

    /// The largest value to show when plotting the density.
    fn plot_max_value(&self) -> f64;

    /// A short description of the parameters, used as the plot legend.
    fn plot_label(&self) -> String;

    /// Evaluates [`pdf`](Self::pdf) element-wise.
    fn pdf_many(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.pdf(x)).collect()
    }
}

impl<D: Distribution + ?Sized> Distribution for Box<D> {
    fn pdf(&self, x: f64) -> f64 {
        (**self).pdf(x)
    }

    fn mean(&self) -> f64 {
        (**self).mean()
    }

    fn plot_min_value(&self) -> f64 {
        (**self).plot_min_value()
    }

    fn plot_max_value(&self) -> f64 {
        (**self).plot_max_value()
    }

    fn plot_label(&self) -> String {
        (**self).plot_label()
    }
}
