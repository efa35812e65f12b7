//! A single type covering every distribution a parameter can be declared with.
//!
//! [`ParamDistribution`] lets a search space mix continuous and choice
//! parameters in one collection, e.g. the [`ParameterSpace`] of a
//! [`PipelineNode`](crate::pipeline::PipelineNode).
//!
//! # Example
//!
//! ```
//! use autoopt::distribution::{Choice, LogUniform};
//! use autoopt::space::{ParamDistribution, ParameterSpace};
//! use autoopt::{Category, ParamValue};
//!
//! let mut space = ParameterSpace::new();
//! space.insert("lr".into(), LogUniform::new(1e-5, 1e-1).unwrap().into());
//! space.insert(
//!     "optimizer".into(),
//!     Choice::new([Category::from("sgd"), Category::from("adam")]).unwrap().into(),
//! );
//!
//! assert_eq!(space["optimizer"].pdf(&ParamValue::from("adam")), 0.5);
//! assert_eq!(space["lr"].pdf(&ParamValue::from("adam")), 0.0);
//! ```

use std::collections::BTreeMap;

use crate::distribution::{
    Choice, Distribution, LogNormal, LogUniform, Normal, QLogNormal, QLogUniform, QNormal,
    QUniform, Uniform, WeightedChoice,
};
use crate::param::{Category, ParamValue};

/// Named parameters mapped to the distribution they are drawn from.
pub type ParameterSpace = BTreeMap<String, ParamDistribution>;

/// Enum wrapping all parameter distribution types.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamDistribution {
    /// A [`Uniform`] distribution.
    Uniform(Uniform),
    /// A [`QUniform`] distribution.
    QUniform(QUniform),
    /// A [`LogUniform`] distribution.
    LogUniform(LogUniform),
    /// A [`QLogUniform`] distribution.
    QLogUniform(QLogUniform),
    /// A [`Normal`] distribution.
    Normal(Normal),
    /// A [`QNormal`] distribution.
    QNormal(QNormal),
    /// A [`LogNormal`] distribution.
    LogNormal(LogNormal),
    /// A [`QLogNormal`] distribution.
    QLogNormal(QLogNormal),
    /// A weighted choice over opaque values.
    Choice(WeightedChoice<Category>),
}

impl ParamDistribution {
    /// Returns the continuous distribution, or `None` for a choice.
    #[must_use]
    pub fn as_continuous(&self) -> Option<&dyn Distribution> {
        match self {
            Self::Uniform(d) => Some(d),
            Self::QUniform(d) => Some(d),
            Self::LogUniform(d) => Some(d),
            Self::QLogUniform(d) => Some(d),
            Self::Normal(d) => Some(d),
            Self::QNormal(d) => Some(d),
            Self::LogNormal(d) => Some(d),
            Self::QLogNormal(d) => Some(d),
            Self::Choice(_) => None,
        }
    }

    /// Returns the choice distribution, or `None` for a continuous one.
    #[must_use]
    pub fn as_choice(&self) -> Option<&WeightedChoice<Category>> {
        match self {
            Self::Choice(c) => Some(c),
            _ => None,
        }
    }

    /// Whether the distribution ranges over a finite set of values.
    #[must_use]
    pub fn is_discrete(&self) -> bool {
        matches!(self, Self::Choice(_))
    }

    /// Returns the density (or mass, for choices) at `x`.
    ///
    /// A value of the wrong kind (a category for a continuous distribution)
    /// has zero density. A `Float` queried against a choice is looked up as
    /// [`Category::Float`].
    #[must_use]
    pub fn pdf(&self, x: &ParamValue) -> f64 {
        match (self, x) {
            (Self::Choice(c), ParamValue::Category(value)) => c.pdf(value),
            (Self::Choice(c), ParamValue::Float(value)) => c.pdf(&Category::Float(*value)),
            (_, ParamValue::Float(value)) => self
                .as_continuous()
                .map_or(0.0, |dist| dist.pdf(*value)),
            (_, ParamValue::Category(_)) => 0.0,
        }
    }

    /// Returns the mean as a parameter value.
    #[must_use]
    pub fn mean(&self) -> ParamValue {
        match self {
            Self::Choice(c) => ParamValue::Category(c.mean().clone()),
            _ => ParamValue::Float(self.as_continuous().map_or(f64::NAN, Distribution::mean)),
        }
    }

    /// A short name of the variant, e.g. `"QLogUniform"`.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Uniform(_) => "Uniform",
            Self::QUniform(_) => "QUniform",
            Self::LogUniform(_) => "LogUniform",
            Self::QLogUniform(_) => "QLogUniform",
            Self::Normal(_) => "Normal",
            Self::QNormal(_) => "QNormal",
            Self::LogNormal(_) => "LogNormal",
            Self::QLogNormal(_) => "QLogNormal",
            Self::Choice(_) => "Choice",
        }
    }
}

macro_rules! impl_from_distribution {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for ParamDistribution {
                fn from(dist: $variant) -> Self {
                    Self::$variant(dist)
                }
            }
        )*
    };
}

impl_from_distribution!(
    Uniform,
    QUniform,
    LogUniform,
    QLogUniform,
    Normal,
    QNormal,
    LogNormal,
    QLogNormal,
);

impl From<WeightedChoice<Category>> for ParamDistribution {
    fn from(dist: WeightedChoice<Category>) -> Self {
        Self::Choice(dist)
    }
}

impl From<Choice<Category>> for ParamDistribution {
    fn from(dist: Choice<Category>) -> Self {
        Self::Choice(dist.into())
    }
}
