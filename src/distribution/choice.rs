use core::borrow::Borrow;
use core::fmt::Debug;

use crate::error::{Error, Result};

/// A distribution over an explicit, ordered set of values with relative weights.
///
/// Weights don't have to sum to one: only their proportions matter, so
/// `[("a", 1.0), ("b", 100.0)]` makes `"b"` one hundred times more likely
/// than `"a"`. Entries keep their insertion order, which is what
/// [`mean`](Self::mean) relies on.
///
/// # Example
///
/// ```
/// use autoopt::distribution::WeightedChoice;
///
/// let dist = WeightedChoice::new([("a", 1.0), ("b", 100.0)]).unwrap();
/// assert!((dist.pdf(&"b") - 100.0 / 101.0).abs() < 1e-12);
/// assert_eq!(dist.pdf(&"c"), 0.0);
/// assert_eq!(*dist.mean(), "b");
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(
        try_from = "WeightedChoiceDto<T>",
        bound(deserialize = "T: serde::Deserialize<'de> + PartialEq")
    )
)]
pub struct WeightedChoice<T> {
    choices: Vec<(T, f64)>,
    #[cfg_attr(feature = "serde", serde(skip_serializing))]
    weight_sum: f64,
}

impl<T: PartialEq> WeightedChoice<T> {
    /// Creates a weighted choice from `(value, weight)` pairs.
    ///
    /// The pairs behave like an insertion-ordered map: a value listed twice
    /// keeps the position of its first occurrence and the weight of its
    /// last one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyChoices`] if no pairs are given,
    /// [`Error::InvalidWeight`] if a weight is not a positive finite number,
    /// and [`Error::InvalidWeightSum`] if the weights add up to infinity.
    pub fn new<I>(choices: I) -> Result<Self>
    where
        I: IntoIterator<Item = (T, f64)>,
    {
        let mut entries: Vec<(T, f64)> = Vec::new();
        for (index, (value, weight)) in choices.into_iter().enumerate() {
            if !weight.is_finite() || weight <= 0.0 {
                return Err(Error::InvalidWeight { index, weight });
            }
            match entries.iter_mut().find(|(existing, _)| *existing == value) {
                Some(entry) => entry.1 = weight,
                None => entries.push((value, weight)),
            }
        }
        if entries.is_empty() {
            return Err(Error::EmptyChoices);
        }

        let weight_sum: f64 = entries.iter().map(|(_, weight)| weight).sum();
        if !weight_sum.is_finite() {
            return Err(Error::InvalidWeightSum(weight_sum));
        }
        trace_debug!(n_choices = entries.len(), weight_sum, "weighted choice created");
        Ok(Self {
            choices: entries,
            weight_sum,
        })
    }

    /// Returns the probability of drawing `x`, or `0.0` if `x` is not a choice.
    #[must_use]
    pub fn pdf<Q>(&self, x: &Q) -> f64
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.weight(x).map_or(0.0, |weight| weight / self.weight_sum)
    }

    /// Returns the raw weight of `x`, if it is a choice.
    #[must_use]
    pub fn weight<Q>(&self, x: &Q) -> Option<f64>
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.choices
            .iter()
            .find(|(value, _)| value.borrow() == x)
            .map(|(_, weight)| *weight)
    }
}

impl<T> WeightedChoice<T> {
    /// The `(value, weight)` pairs in insertion order.
    #[must_use]
    pub fn choices(&self) -> &[(T, f64)] {
        &self.choices
    }

    /// The values in insertion order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.choices.iter().map(|(value, _)| value)
    }

    /// The sum of all weights.
    #[must_use]
    pub fn weight_sum(&self) -> f64 {
        self.weight_sum
    }

    /// The number of distinct choices.
    #[must_use]
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Always `false`: construction rejects empty choice sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// The normalized probability of each value, in insertion order.
    pub fn probabilities(&self) -> impl Iterator<Item = (&T, f64)> {
        self.choices
            .iter()
            .map(|(value, weight)| (value, weight / self.weight_sum))
    }

    /// Returns the value at the probability-weighted average position.
    ///
    /// This is `choices[round(Σ i · p_i)]`: the expectation is taken over
    /// the *positions* of the values, not the values themselves, since
    /// arbitrary choice values have no meaningful average. Half-way indices
    /// round to the even neighbour, so two equally weighted values yield the
    /// first one.
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn mean(&self) -> &T {
        let average: f64 = self
            .probabilities()
            .enumerate()
            .map(|(index, (_, probability))| index as f64 * probability)
            .sum();
        let index = (average.round_ties_even() as usize).min(self.choices.len().saturating_sub(1));
        &self.choices[index].0
    }

    /// The left edge of the bar chart.
    #[must_use]
    pub fn plot_min_value(&self) -> f64 {
        0.0
    }

    /// The right edge of the bar chart.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn plot_max_value(&self) -> f64 {
        self.choices.len() as f64
    }
}

/// A [`WeightedChoice`] in which every value is equally likely.
///
/// # Example
///
/// ```
/// use autoopt::distribution::Choice;
///
/// let dist = Choice::new(["x", "y", "z"]).unwrap();
/// assert_eq!(dist.pdf(&"x"), dist.pdf(&"y"));
/// assert!((dist.pdf(&"z") - 1.0 / 3.0).abs() < 1e-12);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(bound(deserialize = "T: serde::Deserialize<'de> + PartialEq"))
)]
pub struct Choice<T> {
    inner: WeightedChoice<T>,
}

impl<T: PartialEq> Choice<T> {
    /// Creates an equiprobable choice over `values`.
    ///
    /// Values keep their input order. Repeated values collapse into a single
    /// entry at the position of their first occurrence, so
    /// `["a", "a", "b"]` is a fair coin between `"a"` and `"b"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyChoices`] if `values` is empty.
    pub fn new<I>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        Ok(Self {
            inner: WeightedChoice::new(values.into_iter().map(|value| (value, 1.0)))?,
        })
    }

    /// Returns the probability of drawing `x`, or `0.0` if `x` is not a choice.
    #[must_use]
    pub fn pdf<Q>(&self, x: &Q) -> f64
    where
        T: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.inner.pdf(x)
    }
}

impl<T: Categorical> Choice<T> {
    /// Creates an equiprobable choice over every variant of `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyChoices`] if `T` has no variants.
    pub fn of_variants() -> Result<Self> {
        Self::new(T::variants())
    }
}

impl<T> Choice<T> {
    /// Returns the middle value, as defined by [`WeightedChoice::mean`].
    #[must_use]
    pub fn mean(&self) -> &T {
        self.inner.mean()
    }

    /// The underlying weighted choice, with a weight of `1.0` per value.
    #[must_use]
    pub fn as_weighted(&self) -> &WeightedChoice<T> {
        &self.inner
    }

    /// The values in input order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.inner.values()
    }

    /// The number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Always `false`: construction rejects empty value lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl<T> From<Choice<T>> for WeightedChoice<T> {
    fn from(choice: Choice<T>) -> Self {
        choice.inner
    }
}

/// Wire form of [`WeightedChoice`]: the pairs only, re-validated on decoding.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct WeightedChoiceDto<T> {
    choices: Vec<(T, f64)>,
}

#[cfg(feature = "serde")]
impl<T: PartialEq> TryFrom<WeightedChoiceDto<T>> for WeightedChoice<T> {
    type Error = Error;

    fn try_from(dto: WeightedChoiceDto<T>) -> Result<Self> {
        Self::new(dto.choices)
    }
}

/// Enum types whose variants form a fixed set of choices.
///
/// Implement it by hand or, with the `derive` feature, via
/// `#[derive(Categorical)]` on a fieldless enum.
///
/// # Example
///
/// ```
/// use autoopt::distribution::{Categorical, Choice};
///
/// #[derive(Clone, Debug, PartialEq)]
/// enum Activation {
///     Relu,
///     Tanh,
/// }
///
/// impl Categorical for Activation {
///     fn variants() -> Vec<Self> {
///         vec![Activation::Relu, Activation::Tanh]
///     }
///
///     fn variant_name(&self) -> &'static str {
///         match self {
///             Activation::Relu => "Relu",
///             Activation::Tanh => "Tanh",
///         }
///     }
/// }
///
/// let dist = Choice::<Activation>::of_variants().unwrap();
/// assert_eq!(dist.pdf(&Activation::Tanh), 0.5);
/// ```
pub trait Categorical: Sized + Clone + PartialEq + Debug {
    /// Every variant, in declaration order.
    fn variants() -> Vec<Self>;

    /// The identifier of this variant, used as its label by
    /// [`ChoicePlot::of_variants`](crate::visualization::ChoicePlot::of_variants).
    fn variant_name(&self) -> &'static str;
}
