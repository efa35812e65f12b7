use std::collections::HashMap;

use super::PipelineNode;
use crate::error::{Error, Result};

/// A function producing a fresh instance of a node.
pub type NodeFactory = Box<dyn Fn() -> Box<dyn PipelineNode> + Send + Sync>;

/// A table of node factories, looked up by name.
///
/// Nodes are registered explicitly and the registry is handed to whatever
/// builds pipelines (see [`Pipeline::from_registry`](super::Pipeline::from_registry)),
/// so there is no process-wide state to discover implementations from.
///
/// # Example
///
/// ```
/// use autoopt::pipeline::{NodeData, NodeParams, NodeRegistry, Pipeline, PipelineNode};
/// use autoopt::space::ParameterSpace;
/// use autoopt::Result;
///
/// struct Identity;
///
/// impl PipelineNode for Identity {
///     fn name(&self) -> &str { "identity" }
///     fn input_type(&self) -> &str { "Any" }
///     fn output_type(&self) -> &str { "Any" }
///     fn parameter_space(&self) -> ParameterSpace { ParameterSpace::new() }
///     fn execute(&self, input: NodeData, _: &NodeParams) -> Result<NodeData> { Ok(input) }
/// }
///
/// let mut registry = NodeRegistry::new();
/// registry.register("identity", || Identity).unwrap();
///
/// let pipeline = Pipeline::from_registry(&registry, &["identity", "identity"]).unwrap();
/// assert_eq!(pipeline.len(), 2);
/// ```
#[derive(Default)]
pub struct NodeRegistry {
    factories: HashMap<String, NodeFactory>,
}

impl NodeRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateNode`] if `name` is already taken.
    pub fn register<N, F>(&mut self, name: impl Into<String>, factory: F) -> Result<()>
    where
        N: PipelineNode + 'static,
        F: Fn() -> N + Send + Sync + 'static,
    {
        let name = name.into();
        if self.factories.contains_key(&name) {
            return Err(Error::DuplicateNode(name));
        }
        trace_info!(node = %name, "node registered");
        self.factories.insert(
            name,
            Box::new(move || Box::new(factory()) as Box<dyn PipelineNode>),
        );
        Ok(())
    }

    /// Creates a new instance of the node registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownNode`] if nothing is registered under `name`.
    pub fn create(&self, name: &str) -> Result<Box<dyn PipelineNode>> {
        self.factories
            .get(name)
            .map(|factory| factory())
            .ok_or_else(|| Error::UnknownNode(name.to_owned()))
    }

    /// Whether a factory is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// The registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl core::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("names", &self.names())
            .finish()
    }
}
