//! Values that parameters can take.

use core::fmt;

/// An opaque value offered by a choice distribution.
///
/// Choice values only need to be comparable, never ordered or averaged.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    /// A string value, e.g. the name of an algorithm.
    Str(String),
    /// An integer value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
    /// A boolean flag.
    Bool(bool),
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(i) => write!(f, "{i}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for Category {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Category {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<f64> for Category {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<bool> for Category {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A value drawn from a [`ParamDistribution`](crate::space::ParamDistribution).
///
/// Continuous distributions produce `Float` values, choice distributions
/// produce `Category` values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamValue {
    /// A value of a continuous distribution.
    Float(f64),
    /// A value of a choice distribution.
    Category(Category),
}

impl ParamValue {
    /// Returns the float value, if this is a `Float`.
    #[must_use]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            Self::Category(_) => None,
        }
    }

    /// Returns the category, if this is a `Category`.
    #[must_use]
    pub fn as_category(&self) -> Option<&Category> {
        match self {
            Self::Category(c) => Some(c),
            Self::Float(_) => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Category(c) => write!(f, "{c}"),
        }
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<Category> for ParamValue {
    fn from(value: Category) -> Self {
        Self::Category(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Category(value.into())
    }
}
