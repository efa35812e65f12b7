//! Processing pipelines whose stages publish their parameter spaces.
//!
//! A [`Pipeline`] is an ordered list of [`PipelineNode`]s. Every node
//! declares the data type it consumes and produces as a plain string tag,
//! and a node can only be appended when its input type matches the
//! pipeline's current output type (or the pipeline still accepts `"Any"`).
//!
//! # Example
//!
//! ```
//! use autoopt::distribution::Uniform;
//! use autoopt::pipeline::{NodeData, NodeParams, Pipeline, PipelineNode};
//! use autoopt::space::ParameterSpace;
//! use autoopt::{ParamValue, Result};
//!
//! struct Scale;
//!
//! impl PipelineNode for Scale {
//!     fn name(&self) -> &str {
//!         "scale"
//!     }
//!     fn input_type(&self) -> &str {
//!         "f64"
//!     }
//!     fn output_type(&self) -> &str {
//!         "f64"
//!     }
//!     fn parameter_space(&self) -> ParameterSpace {
//!         let mut space = ParameterSpace::new();
//!         space.insert("factor".into(), Uniform::new(0.0, 10.0).unwrap().into());
//!         space
//!     }
//!     fn execute(&self, input: NodeData, params: &NodeParams) -> Result<NodeData> {
//!         let value = *input.downcast::<f64>().map_err(|_| self.failure("expected f64"))?;
//!         let factor = params.get("factor").and_then(ParamValue::as_float).unwrap_or(1.0);
//!         Ok(Box::new(value * factor))
//!     }
//! }
//!
//! let mut pipeline = Pipeline::new();
//! pipeline.add_node(Scale).unwrap();
//!
//! let mut params = std::collections::HashMap::new();
//! params.insert(
//!     "scale".to_string(),
//!     NodeParams::from([("factor".to_string(), ParamValue::Float(3.0))]),
//! );
//! let out = pipeline.execute(Box::new(2.0_f64), &params).unwrap();
//! assert_eq!(*out.downcast::<f64>().unwrap(), 6.0);
//! ```

mod registry;

use core::any::Any;
use std::collections::HashMap;

pub use registry::{NodeFactory, NodeRegistry};

use crate::error::{Error, Result};
use crate::param::ParamValue;
use crate::space::ParameterSpace;

/// Type tag of a pipeline that accepts any input.
pub const ANY_TYPE: &str = "Any";

/// Data passed between pipeline nodes.
pub type NodeData = Box<dyn Any + Send>;

/// Parameter values for one node, keyed by parameter name.
pub type NodeParams = HashMap<String, ParamValue>;

/// A stage of a [`Pipeline`].
///
/// Nodes are identified by their [`name`](Self::name); the names of their
/// parameters only have to be unique within the node.
pub trait PipelineNode: Send + Sync {
    /// The name of the node.
    fn name(&self) -> &str;

    /// Type tag of the data this node consumes.
    fn input_type(&self) -> &str;

    /// Type tag of the data this node produces.
    fn output_type(&self) -> &str;

    /// The parameters of this node and the distributions they are drawn from.
    fn parameter_space(&self) -> ParameterSpace;

    /// Runs the node on `input` with the given parameter values.
    ///
    /// # Errors
    ///
    /// Implementations return [`Error::NodeFailed`] (see
    /// [`failure`](Self::failure)) when the input can't be processed.
    fn execute(&self, input: NodeData, params: &NodeParams) -> Result<NodeData>;

    /// Returns a pipeline-wide unique name for `parameter`: `{node}_{parameter}`.
    fn parameter_name(&self, parameter: &str) -> String {
        format!("{}_{parameter}", self.name())
    }

    /// Builds an [`Error::NodeFailed`] attributed to this node.
    fn failure(&self, reason: &str) -> Error {
        Error::NodeFailed {
            node: self.name().to_owned(),
            reason: reason.to_owned(),
        }
    }
}

/// An ordered chain of [`PipelineNode`]s.
///
/// The output of each node is passed as input to the next one. The
/// pipeline's [`input_type`](Self::input_type) is the input type of its
/// first node and its [`output_type`](Self::output_type) the output type of
/// its last node; both are [`ANY_TYPE`] while the pipeline is empty.
#[derive(Default)]
pub struct Pipeline {
    nodes: Vec<Box<dyn PipelineNode>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pipeline from registered node names, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] for a name without a factory and
    /// [`Error::TypeMismatch`] if two consecutive nodes don't fit together.
    pub fn from_registry<S: AsRef<str>>(registry: &NodeRegistry, names: &[S]) -> Result<Self> {
        let mut pipeline = Self::new();
        for name in names {
            pipeline.push_boxed(registry.create(name.as_ref())?)?;
        }
        Ok(pipeline)
    }

    /// Appends `node` to the pipeline.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeMismatch`] unless the current output type is
    /// [`ANY_TYPE`] or equal to the node's input type.
    pub fn add_node<N: PipelineNode + 'static>(&mut self, node: N) -> Result<()> {
        self.push_boxed(Box::new(node))
    }

    /// Appends an already boxed node to the pipeline.
    ///
    /// # Errors
    ///
    /// Same as [`add_node`](Self::add_node).
    pub fn push_boxed(&mut self, node: Box<dyn PipelineNode>) -> Result<()> {
        let output_type = self.output_type();
        if output_type != ANY_TYPE && output_type != node.input_type() {
            return Err(Error::TypeMismatch {
                node: node.name().to_owned(),
                expected: output_type.to_owned(),
                got: node.input_type().to_owned(),
            });
        }
        trace_info!(node = node.name(), position = self.nodes.len(), "node added to pipeline");
        self.nodes.push(node);
        Ok(())
    }

    /// The input type of the first node, or [`ANY_TYPE`] for an empty pipeline.
    #[must_use]
    pub fn input_type(&self) -> &str {
        self.nodes.first().map_or(ANY_TYPE, |node| node.input_type())
    }

    /// The output type of the last node, or [`ANY_TYPE`] for an empty pipeline.
    #[must_use]
    pub fn output_type(&self) -> &str {
        self.nodes.last().map_or(ANY_TYPE, |node| node.output_type())
    }

    /// The names of the nodes, in execution order.
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|node| node.name())
    }

    /// The number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the pipeline has no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The parameter space of every node, keyed by node name, in node order.
    #[must_use]
    pub fn parameter_space(&self) -> Vec<(String, ParameterSpace)> {
        self.nodes
            .iter()
            .map(|node| (node.name().to_owned(), node.parameter_space()))
            .collect()
    }

    /// The parameter spaces of all nodes merged into one, with every
    /// parameter renamed through [`PipelineNode::parameter_name`].
    #[must_use]
    pub fn flat_parameter_space(&self) -> ParameterSpace {
        self.nodes
            .iter()
            .flat_map(|node| {
                node.parameter_space()
                    .into_iter()
                    .map(move |(param, dist)| (node.parameter_name(&param), dist))
            })
            .collect()
    }

    /// Runs every node in order, feeding each output into the next node.
    ///
    /// `params` maps node names to the parameter values of that node; a node
    /// without an entry receives no parameters.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a node; later nodes don't run.
    pub fn execute(
        &self,
        input: NodeData,
        params: &HashMap<String, NodeParams>,
    ) -> Result<NodeData> {
        let empty = NodeParams::new();
        let mut data = input;
        for node in &self.nodes {
            let node_params = params.get(node.name()).unwrap_or(&empty);
            trace_debug!(node = node.name(), n_params = node_params.len(), "executing node");
            data = node.execute(data, node_params)?;
        }
        Ok(data)
    }
}

impl core::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pipeline")
            .field("nodes", &self.node_names().collect::<Vec<_>>())
            .field("input_type", &self.input_type())
            .field("output_type", &self.output_type())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::{Choice, Normal};
    use crate::param::Category;

    struct Node {
        name: &'static str,
        input: &'static str,
        output: &'static str,
    }

    impl PipelineNode for Node {
        fn name(&self) -> &str {
            self.name
        }

        fn input_type(&self) -> &str {
            self.input
        }

        fn output_type(&self) -> &str {
            self.output
        }

        fn parameter_space(&self) -> ParameterSpace {
            let mut space = ParameterSpace::new();
            space.insert("alpha".into(), Normal::new(0.0, 1.0).unwrap().into());
            space.insert(
                "mode".into(),
                Choice::new([Category::from("fast"), Category::from("exact")])
                    .unwrap()
                    .into(),
            );
            space
        }

        fn execute(&self, input: NodeData, params: &NodeParams) -> Result<NodeData> {
            let mut trace = *input
                .downcast::<Vec<String>>()
                .map_err(|_| self.failure("expected a trace"))?;
            let mut keys: Vec<_> = params.keys().cloned().collect();
            keys.sort();
            trace.push(format!("{}[{}]", self.name, keys.join(",")));
            Ok(Box::new(trace))
        }
    }

    fn node(name: &'static str, input: &'static str, output: &'static str) -> Node {
        Node {
            name,
            input,
            output,
        }
    }

    #[test]
    fn empty_pipeline_accepts_any() {
        let pipeline = Pipeline::new();
        assert_eq!(pipeline.input_type(), ANY_TYPE);
        assert_eq!(pipeline.output_type(), ANY_TYPE);
        assert!(pipeline.is_empty());
    }

    #[test]
    fn types_follow_first_and_last_node() {
        let mut pipeline = Pipeline::new();
        pipeline.add_node(node("load", "path", "frame")).unwrap();
        pipeline.add_node(node("clean", "frame", "matrix")).unwrap();
        assert_eq!(pipeline.input_type(), "path");
        assert_eq!(pipeline.output_type(), "matrix");
        assert_eq!(pipeline.len(), 2);
    }

    #[test]
    fn rejects_mismatched_input_type() {
        let mut pipeline = Pipeline::new();
        pipeline.add_node(node("load", "path", "frame")).unwrap();
        let err = pipeline.add_node(node("fit", "matrix", "model")).unwrap_err();
        assert!(matches!(
            err,
            Error::TypeMismatch { ref node, ref expected, ref got }
                if node == "fit" && expected == "frame" && got == "matrix"
        ));
        assert_eq!(pipeline.len(), 1);
    }

    #[test]
    fn any_output_accepts_every_node() {
        let mut pipeline = Pipeline::new();
        pipeline.add_node(node("passthrough", "Any", "Any")).unwrap();
        pipeline.add_node(node("fit", "matrix", "model")).unwrap();
        assert_eq!(pipeline.output_type(), "model");
    }

    #[test]
    fn parameter_names_are_prefixed_by_node() {
        let n = node("svm", "matrix", "model");
        assert_eq!(n.parameter_name("c"), "svm_c");
    }

    #[test]
    fn parameter_space_keeps_node_order() {
        let mut pipeline = Pipeline::new();
        pipeline.add_node(node("b_second", "x", "x")).unwrap();
        pipeline.add_node(node("a_first", "x", "x")).unwrap();
        let names: Vec<_> = pipeline
            .parameter_space()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, vec!["b_second", "a_first"]);

        let flat = pipeline.flat_parameter_space();
        assert_eq!(
            flat.keys().map(String::as_str).collect::<Vec<_>>(),
            vec!["a_first_alpha", "a_first_mode", "b_second_alpha", "b_second_mode"]
        );
    }

    #[test]
    fn execute_threads_data_and_params() {
        let mut pipeline = Pipeline::new();
        pipeline.add_node(node("one", "trace", "trace")).unwrap();
        pipeline.add_node(node("two", "trace", "trace")).unwrap();

        let mut params = HashMap::new();
        params.insert(
            "two".to_string(),
            NodeParams::from([
                ("alpha".to_string(), ParamValue::Float(0.5)),
                ("mode".to_string(), ParamValue::from("fast")),
            ]),
        );

        let out = pipeline
            .execute(Box::new(Vec::<String>::new()), &params)
            .unwrap();
        let trace = out.downcast::<Vec<String>>().unwrap();
        assert_eq!(*trace, vec!["one[]".to_string(), "two[alpha,mode]".to_string()]);
    }

    #[test]
    fn execute_stops_at_first_failure() {
        let mut pipeline = Pipeline::new();
        pipeline.add_node(node("one", "trace", "trace")).unwrap();
        let err = pipeline
            .execute(Box::new(42_u32), &HashMap::new())
            .unwrap_err();
        assert!(matches!(err, Error::NodeFailed { ref node, .. } if node == "one"));
    }
}
