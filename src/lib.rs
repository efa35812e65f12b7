#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Typed hyperparameter search spaces and parameterized processing pipelines.
//!
//! Declare how each parameter of an algorithm is distributed (uniform,
//! log-uniform, normal, log-normal, their quantized variants, or a weighted
//! choice over explicit values), inspect those declarations through their
//! density and mean, and chain algorithms into pipelines whose nodes publish
//! their parameter spaces.
//!
//! # Getting Started
//!
//! ```
//! use autoopt::prelude::*;
//!
//! let lr = LogUniform::new(1e-5, 1e-1).unwrap();
//! let units = QUniform::new(16.0, 512.0, 16.0).unwrap();
//! let activation = Choice::new(["relu", "tanh", "gelu"]).unwrap();
//!
//! assert!(lr.pdf(1e-4) > lr.pdf(1e-2));
//! assert_eq!(units.pdf(100.0), units.pdf(96.0));
//! assert_eq!(*activation.mean(), "tanh");
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Distribution`](distribution::Distribution) | Density, mean, and plot hints of a continuous distribution. |
//! | [`Quantized`](distribution::Quantized) | Snaps queries and the mean of any distribution onto multiples of `q`. |
//! | [`WeightedChoice`](distribution::WeightedChoice) / [`Choice`](distribution::Choice) | Distributions over an explicit, ordered set of values. |
//! | [`ParamDistribution`](space::ParamDistribution) | One type for every distribution, used in [`ParameterSpace`](space::ParameterSpace)s. |
//! | [`Pipeline`](pipeline::Pipeline) | Ordered chain of [`PipelineNode`](pipeline::PipelineNode)s with matching data types. |
//! | [`NodeRegistry`](pipeline::NodeRegistry) | Explicit table of node factories, looked up by name. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `derive` | `#[derive(Categorical)]` for fieldless enums used as choices | off |
//! | `serde` | `Serialize`/`Deserialize` on public types, [`Task::save`]/[`Task::load`] | off |
//! | `tracing` | Structured log events via [`tracing`](https://docs.rs/tracing) | off |

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::warn!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($($arg:tt)*) => {};
}

pub mod distribution;
mod error;
mod param;
pub mod pipeline;
pub mod quantization;
pub mod space;
mod task;
pub mod visualization;

#[cfg(feature = "derive")]
pub use autoopt_derive::Categorical;
pub use error::{Error, Result};
pub use param::{Category, ParamValue};
#[cfg(feature = "serde")]
pub use task::TaskSnapshot;
pub use task::Task;

/// Convenient wildcard import for the most common types.
///
/// ```
/// use autoopt::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "derive")]
    pub use autoopt_derive::Categorical as DeriveCategorical;

    pub use crate::distribution::{
        Categorical, Choice, Distribution, LogNormal, LogUniform, Normal, QLogNormal, QLogUniform,
        QNormal, QUniform, Quantized, Uniform, WeightedChoice,
    };
    pub use crate::error::{Error, Result};
    pub use crate::param::{Category, ParamValue};
    pub use crate::pipeline::{NodeData, NodeParams, NodeRegistry, Pipeline, PipelineNode};
    pub use crate::quantization::Quantization;
    pub use crate::space::{ParamDistribution, ParameterSpace};
    pub use crate::task::Task;
    pub use crate::visualization::{ChoicePlot, PdfPlot};
}
